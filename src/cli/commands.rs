//! Command dispatch: maps parsed arguments onto application services

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::services::GenealogyService;
use crate::cli::args::{Cli, Commands, ConfigCommands, PersonArgs};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::{FamilyTree, ParentRole, PersonData, TreeNodeConvert};
use crate::infrastructure::di::ServiceContainer;

impl From<&PersonArgs> for PersonData {
    fn from(args: &PersonArgs) -> Self {
        PersonData::new(&args.surname, &args.given, &args.born)
    }
}

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let mut settings = Settings::load()?;
    if let Some(file) = &cli.file {
        settings = settings.with_snapshot_path(file);
    }
    debug!("snapshot path: {}", settings.snapshot_path.display());
    let container = ServiceContainer::new(settings);

    match &cli.command {
        Some(Commands::Init {
            root,
            spouse_surname,
            spouse_given,
            spouse_born,
            force,
        }) => {
            let spouse = match (spouse_surname, spouse_given, spouse_born) {
                (Some(surname), Some(given), Some(born)) => {
                    Some(PersonData::new(surname, given, born))
                }
                _ => None,
            };
            cmd_init(&container, root.into(), spouse, *force)
        }
        Some(Commands::Show { tree }) => cmd_show(&container, *tree),
        Some(Commands::Marry {
            first,
            second,
            no_save,
        }) => cmd_marry(&container, first, second, !no_save),
        Some(Commands::AddChild {
            parent,
            child,
            role,
            no_save,
        }) => cmd_add_child(&container, parent, child.into(), *role, !no_save),
        Some(Commands::Search { name }) => cmd_search(&container, name),
        Some(Commands::Find { given }) => cmd_find(&container, given),
        Some(Commands::Reset { yes, no_save }) => cmd_reset(&container, *yes, !no_save),
        Some(Commands::Config { command }) => cmd_config(&container, command),
        Some(Commands::Completion { shell }) => {
            cmd_completion(*shell);
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given (see famtree --help)".to_string(),
        )),
    }
}

#[instrument(skip(container))]
fn cmd_init(
    container: &ServiceContainer,
    root: PersonData,
    spouse: Option<PersonData>,
    force: bool,
) -> CliResult<()> {
    let service = container.genealogy_service();
    let tree = service.initialize(root, spouse, force)?;
    output::success(&format!(
        "created family tree at {}",
        service.store().path().display()
    ));
    print_tree(container, &tree, false);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_show(container: &ServiceContainer, boxed: bool) -> CliResult<()> {
    let tree = container.genealogy_service().load_tree()?;
    output::header("Family tree");
    print_tree(container, &tree, boxed);
    output::summary(tree.iter().count(), tree.depth(), tree.leaf_nodes().len());
    Ok(())
}

#[instrument(skip(container))]
fn cmd_marry(container: &ServiceContainer, first: &str, second: &str, save: bool) -> CliResult<()> {
    let service = container.genealogy_service();
    let mut tree = service.load_tree()?;
    let (a, b) = service.marry(&mut tree, first, second)?;
    if let (Some(label_a), Some(label_b)) = (tree.label(a), tree.label(b)) {
        output::action("Married", &format!("{} and {}", label_a, label_b));
    }
    save_if(&service, &tree, save)
}

#[instrument(skip(container))]
fn cmd_add_child(
    container: &ServiceContainer,
    parent: &str,
    child: PersonData,
    role: ParentRole,
    save: bool,
) -> CliResult<()> {
    let service = container.genealogy_service();
    let mut tree = service.load_tree()?;
    let name = child.full_name();
    service.add_child(&mut tree, parent, child, role)?;
    output::action(
        "Added",
        &format!("{} as child of {} ({})", name, parent.trim(), role),
    );
    save_if(&service, &tree, save)
}

#[instrument(skip(container))]
fn cmd_search(container: &ServiceContainer, name: &str) -> CliResult<()> {
    let tree = container.genealogy_service().load_tree()?;
    match tree
        .search_by_full_name(tree.root(), name)
        .and_then(|idx| tree.get(idx))
    {
        Some(person) => {
            output::record(&person.data);
            Ok(())
        }
        None => Err(CliError::NotFound(name.trim().to_string())),
    }
}

#[instrument(skip(container))]
fn cmd_find(container: &ServiceContainer, given: &str) -> CliResult<()> {
    let tree = container.genealogy_service().load_tree()?;
    let found = tree
        .search_by_given_name(tree.root(), given, &mut io::stdout())
        .map_err(|e| CliError::Io {
            context: "write search result".to_string(),
            source: e,
        })?;
    if found {
        Ok(())
    } else {
        Err(CliError::NotFound(given.to_string()))
    }
}

#[instrument(skip(container))]
fn cmd_reset(container: &ServiceContainer, yes: bool, save: bool) -> CliResult<()> {
    if !yes {
        return Err(CliError::Usage(
            "reset deletes every descendant of the root; pass --yes to confirm".to_string(),
        ));
    }
    let service = container.genealogy_service();
    let mut tree = service.load_tree()?;
    let removed = service.reset(&mut tree)?;
    output::action("Reset", &format!("removed {} persons", removed));
    save_if(&service, &tree, save)
}

fn cmd_config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::config_text(&container.settings.to_toml()?),
        ConfigCommands::Init => output::config_text(&Settings::template()),
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::detail(&format!("global:   {}", path.display())),
                None => output::warning("no config directory on this platform"),
            }
            output::detail(&format!(
                "snapshot: {}",
                container.settings.snapshot_path.display()
            ));
        }
    }
    Ok(())
}

fn cmd_completion(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

fn print_tree(container: &ServiceContainer, tree: &FamilyTree, boxed: bool) {
    if boxed {
        output::tree(&tree.to_tree_string());
    } else {
        let text = tree.render_indented(tree.root(), 0, container.settings.indent_width);
        output::tree(&text);
    }
}

fn save_if(service: &GenealogyService, tree: &FamilyTree, save: bool) -> CliResult<()> {
    if save {
        service.save(tree)?;
        output::saved(service.store().path());
    } else {
        output::warning("changes not saved (--no-save)");
    }
    Ok(())
}
