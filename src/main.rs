use clap::Parser;
use roster::config::cli::{Cli, Command, LinkCommand, OfferingCommand, PersonCommand};
use roster::domain::{Offering, OfferingPatch, OfferingQuery, Person, PersonPatch, PersonQuery};
use roster::utils::logger;
use roster::{FileGateway, LinkStore, Store};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::debug!(data_dir = %cli.data_dir.display(), "starting roster");

    let gateway = FileGateway::new(&cli.data_dir)?;

    if let Err(e) = run(cli.command, gateway) {
        tracing::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn run(command: Command, gateway: FileGateway) -> roster::Result<()> {
    match command {
        Command::Person(command) => run_person(command, gateway),
        Command::Offering(command) => run_offering(command, gateway),
        Command::Link(command) => run_link(command, gateway),
        Command::Backup { collection } => {
            match gateway.backup(&collection)? {
                Some(path) => println!("backup written to {}", path.display()),
                None => println!("no backing document for '{}' yet", collection),
            }
            Ok(())
        }
    }
}

fn run_person(command: PersonCommand, gateway: FileGateway) -> roster::Result<()> {
    let mut people: Store<Person> = Store::open(gateway, "people")?;

    match command {
        PersonCommand::Add {
            id,
            name,
            email,
            program,
        } => {
            let person = people.create(Person::new(id, name, email, program))?;
            println!("created {}", person);
        }
        PersonCommand::Get { id } => match people.get(&id) {
            Some(person) => println!("{}", person),
            None => println!("person '{}' not found", id),
        },
        PersonCommand::List => {
            for person in people.list() {
                println!("{}", person);
            }
        }
        PersonCommand::Update {
            id,
            name,
            email,
            program,
        } => {
            let patch = PersonPatch {
                name,
                email,
                program,
            };
            let person = people.update(&id, patch)?;
            println!("updated {}", person);
        }
        PersonCommand::Remove { id } => {
            if people.delete(&id)? {
                println!("removed person '{}'", id);
            } else {
                println!("person '{}' not found", id);
            }
        }
        PersonCommand::Search { name, program } => {
            for person in people.search(&PersonQuery { name, program }) {
                println!("{}", person);
            }
        }
    }

    Ok(())
}

fn run_offering(command: OfferingCommand, gateway: FileGateway) -> roster::Result<()> {
    let mut offerings: Store<Offering> = Store::open(gateway, "offerings")?;

    match command {
        OfferingCommand::Add {
            code,
            title,
            credits,
            instructor,
        } => {
            let offering = offerings.create(Offering::new(code, title, credits, instructor))?;
            println!("created {}", offering);
        }
        OfferingCommand::Get { code } => match offerings.get(&code) {
            Some(offering) => println!("{}", offering),
            None => println!("offering '{}' not found", code),
        },
        OfferingCommand::List => {
            for offering in offerings.list() {
                println!("{}", offering);
            }
        }
        OfferingCommand::Update {
            code,
            title,
            credits,
            instructor,
        } => {
            let patch = OfferingPatch {
                title,
                credits,
                instructor,
            };
            let offering = offerings.update(&code, patch)?;
            println!("updated {}", offering);
        }
        OfferingCommand::Remove { code } => {
            if offerings.delete(&code)? {
                println!("removed offering '{}'", code);
            } else {
                println!("offering '{}' not found", code);
            }
        }
        OfferingCommand::Search {
            code,
            title,
            instructor,
        } => {
            let query = OfferingQuery {
                code,
                title,
                instructor,
            };
            for offering in offerings.search(&query) {
                println!("{}", offering);
            }
        }
    }

    Ok(())
}

fn run_link(command: LinkCommand, gateway: FileGateway) -> roster::Result<()> {
    let mut links = LinkStore::open(gateway.clone())?;

    match command {
        LinkCommand::Add {
            person_id,
            offering_code,
        } => {
            let people: Store<Person> = Store::open(gateway.clone(), "people")?;
            let offerings: Store<Offering> = Store::open(gateway, "offerings")?;
            let record = links.link(&people, &offerings, &person_id, &offering_code)?;
            println!("linked {}", record);
        }
        LinkCommand::Remove {
            person_id,
            offering_code,
        } => {
            if links.unlink(&person_id, &offering_code)? {
                println!("unlinked {} -> {}", person_id, offering_code);
            } else {
                println!("no link for {} -> {}", person_id, offering_code);
            }
        }
        LinkCommand::Grade {
            person_id,
            offering_code,
            score,
        } => {
            let record = links.assign_score(&person_id, &offering_code, score)?;
            println!("graded {}", record);
        }
        LinkCommand::ForPerson { person_id } => {
            for record in links.links_for_person(&person_id) {
                println!("{}", record);
            }
        }
        LinkCommand::ForOffering { offering_code } => {
            for record in links.links_for_offering(&offering_code) {
                println!("{}", record);
            }
        }
        LinkCommand::PersonAverage { person_id } => {
            println!("{:.1}", links.average_for_person(&person_id));
        }
        LinkCommand::OfferingAverage { offering_code } => {
            println!("{:.1}", links.average_for_offering(&offering_code));
        }
    }

    Ok(())
}
