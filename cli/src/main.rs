#![allow(clippy::print_stdout)]
use crate::cli::{Args, ClassArgs, Command};
use anyhow::{bail, Context};
use clap::Parser;
use futures::StreamExt;
use rdf_resources::model::{NamedNodeRef, Term};
use rdf_resources::sparql::{Credentials, SparqlEndpoint};
use rdf_resources::{PropertyValues, ResourceClass, ResourceClassConfig};
use std::fs;
use std::io::{self, stdout, Write};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let matches = Args::parse();
    let mut out = stdout().lock();
    match matches.command {
        Command::Classes { endpoint } => {
            let endpoint = SparqlEndpoint::parse(&endpoint)?;
            for class in endpoint.classes().await? {
                writeln!(out, "{class}")?;
            }
        }
        Command::Properties { endpoint, class } => {
            let endpoint = SparqlEndpoint::parse(&endpoint)?;
            let class = NamedNodeRef::new(&class)
                .with_context(|| format!("The class IRI {class} is invalid"))?;
            for property in endpoint.properties(class).await? {
                writeln!(out, "{property}")?;
            }
        }
        Command::Resources {
            class,
            limit,
            filter,
        } => {
            let class = resource_class(class)?;
            let mut query = class.query();
            if let Some(filter) = filter {
                query = query.filter(filter);
            }
            if let Some(limit) = limit {
                query = query.limit(limit);
            }
            let mut resources = query.resources();
            while let Some(resource) = resources.next().await {
                writeln!(out, "{}", resource?.uri())?;
            }
        }
        Command::Get {
            class,
            resource,
            property,
        } => {
            let resource = resource_class(class)?.resource(resource);
            let values = if property.contains(':') {
                resource.get_iri(&property).await?
            } else {
                resource.get_in(&property).await?
            };
            write_values(&mut out, None, &values)?;
        }
        Command::Describe { class, resource } => {
            let description = resource_class(class)?.resource(resource).describe().await?;
            for (property, values) in description.iter() {
                write_values(&mut out, Some(property.as_str()), values)?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

/// Declares the class described by the command line options.
fn resource_class(args: ClassArgs) -> anyhow::Result<ResourceClass> {
    let mut config = if let Some(path) = &args.config {
        let name = args
            .class_name
            .as_deref()
            .context("The --class option must be set when using --config")?;
        let file = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let configs: Vec<ResourceClassConfig> = serde_json::from_str(&file)
            .with_context(|| format!("Invalid class declarations in {}", path.display()))?;
        let Some(config) = configs.into_iter().find(|config| config.name == name) else {
            bail!("There is no class named {name} in {}", path.display())
        };
        config
    } else {
        let (Some(endpoint), Some(prefix), Some(label)) = (args.endpoint, args.prefix, args.label)
        else {
            bail!("The --endpoint, --prefix and --label options must be set without --config")
        };
        ResourceClassConfig::new(label, endpoint, prefix)
    };
    if let (Some(username), Some(password)) = (args.username, args.password) {
        config = config.with_credentials(Credentials::new(username, password));
    }
    if let Some(page_size) = args.page_size {
        config = config.with_page_size(page_size);
    }

    let class = ResourceClass::new(config);
    class.validate()?;
    debug!(class = %class.name(), endpoint = %class.endpoint()?, "Resolved resource class");
    Ok(class)
}

fn write_values(
    out: &mut impl Write,
    property: Option<&str>,
    values: &PropertyValues,
) -> io::Result<()> {
    for value in values {
        match property {
            Some(property) => writeln!(out, "<{property}> {}", term_to_string(value))?,
            None => writeln!(out, "{}", term_to_string(value))?,
        }
    }
    Ok(())
}

fn term_to_string(term: &Term) -> String {
    match term {
        Term::Literal(literal) if literal.is_plain() && literal.language().is_none() => {
            literal.value().to_owned()
        }
        term => term.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdf_resources::model::Literal;

    #[test]
    fn plain_literals_are_printed_raw() {
        assert_eq!(
            term_to_string(&Literal::new_simple_literal("Kraftwerk").into()),
            "Kraftwerk"
        );
        assert_eq!(
            term_to_string(&Literal::new_language_tagged_literal_unchecked("Kraftwerk", "en").into()),
            "\"Kraftwerk\"@en"
        );
    }

    #[test]
    fn clap_debug() {
        use clap::CommandFactory;

        Args::command().debug_assert()
    }
}
