//! Command-line argument parsing for Landmark.

use crate::{LandmarkError, Result};
use std::env;
use std::path::PathBuf;

/// Which slice of the resolved routes to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteView {
    /// Every accessible route, in input order.
    All,
    /// Routes without a parent.
    TopLevel,
    /// Top-level routes flagged for the main navigation bar.
    MainNavigation,
    /// Children of the route with this id.
    Children(String),
    /// Access check for a single path.
    Path(String),
}

/// Command-line interface commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Routes {
        routes_file: PathBuf,
        user_file: PathBuf,
        view: RouteView,
    },
    Comments {
        comments_file: PathBuf,
        scroll_to: Option<String>,
    },
    Soql {
        object: String,
        fields: Vec<String>,
        limit: Option<u32>,
    },
    Help,
}

/// Parse command line arguments into a Command
pub fn parse_args() -> Result<Command> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(&args)
}

/// Parse an argument list (without the program name) into a Command
pub fn parse_args_from(args: &[String]) -> Result<Command> {
    let Some(command) = args.first() else {
        return Ok(Command::Help);
    };

    match command.as_str() {
        "routes" => {
            if args.len() < 3 {
                return Err(LandmarkError::invalid_input(
                    "routes requires a routes file and a user file",
                ));
            }

            let view = match args.get(3).map(String::as_str) {
                None => RouteView::All,
                Some("--top-level") => RouteView::TopLevel,
                Some("--main-nav") => RouteView::MainNavigation,
                Some("--children") => RouteView::Children(flag_value(args, 4, "--children")?),
                Some("--path") => RouteView::Path(flag_value(args, 4, "--path")?),
                Some(other) => {
                    return Err(LandmarkError::invalid_input(format!(
                        "Unknown routes option '{}'",
                        other
                    )))
                }
            };

            Ok(Command::Routes {
                routes_file: PathBuf::from(&args[1]),
                user_file: PathBuf::from(&args[2]),
                view,
            })
        }
        "comments" => {
            if args.len() < 2 {
                return Err(LandmarkError::invalid_input(
                    "comments requires a comments file",
                ));
            }

            let scroll_to = match args.get(2).map(String::as_str) {
                None => None,
                Some("--scroll") => Some(flag_value(args, 3, "--scroll")?),
                Some(other) => {
                    return Err(LandmarkError::invalid_input(format!(
                        "Unknown comments option '{}'",
                        other
                    )))
                }
            };

            Ok(Command::Comments {
                comments_file: PathBuf::from(&args[1]),
                scroll_to,
            })
        }
        "soql" => {
            if args.len() < 3 {
                return Err(LandmarkError::invalid_input(
                    "soql requires an object name and a comma-separated field list",
                ));
            }

            let fields = args[2]
                .split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_string)
                .collect();

            let limit = match args.get(3).map(String::as_str) {
                None => None,
                Some("--limit") => {
                    let raw = flag_value(args, 4, "--limit")?;
                    Some(raw.parse::<u32>().map_err(|_| {
                        LandmarkError::invalid_input(format!("Invalid limit '{}'", raw))
                    })?)
                }
                Some(other) => {
                    return Err(LandmarkError::invalid_input(format!(
                        "Unknown soql option '{}'",
                        other
                    )))
                }
            };

            Ok(Command::Soql {
                object: args[1].clone(),
                fields,
                limit,
            })
        }
        "help" | "--help" | "-h" => Ok(Command::Help),
        other => Err(LandmarkError::invalid_input(format!(
            "Unknown command '{}'",
            other
        ))),
    }
}

fn flag_value(args: &[String], index: usize, flag: &str) -> Result<String> {
    args.get(index)
        .cloned()
        .ok_or_else(|| LandmarkError::invalid_input(format!("{} requires a value", flag)))
}

/// Print usage information
pub fn print_usage() {
    println!("Landmark - intranet navigation, comment threading and CRM queries");
    println!();
    println!("USAGE:");
    println!("    landmark <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    routes <routes.json> <user.json> [--top-level | --main-nav | --children <id> | --path <path>]");
    println!("        Resolve the routes visible to a user");
    println!("    comments <comments.json> [--scroll <id>]");
    println!("        Build display threads from flat comments");
    println!("    soql <object> <field,field,...> [--limit <n>]");
    println!("        Build a SOQL SELECT statement");
    println!("    help");
    println!("        Show this message");
    println!();
    println!("ENVIRONMENT:");
    println!("    LANDMARK_TECHNOLOGY_DEPARTMENT  Department allowed into developing routes (default: Technology)");
    println!("    LANDMARK_LOG                    Log filter when RUST_LOG is unset (default: landmark=info)");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_routes() {
        let cmd = parse_args_from(&args(&["routes", "r.json", "u.json"])).unwrap();
        assert_eq!(
            cmd,
            Command::Routes {
                routes_file: PathBuf::from("r.json"),
                user_file: PathBuf::from("u.json"),
                view: RouteView::All,
            }
        );

        let cmd =
            parse_args_from(&args(&["routes", "r.json", "u.json", "--children", "wiki"])).unwrap();
        assert!(matches!(
            cmd,
            Command::Routes { view: RouteView::Children(ref id), .. } if id == "wiki"
        ));

        assert!(parse_args_from(&args(&["routes", "r.json", "u.json", "--children"])).is_err());
        assert!(parse_args_from(&args(&["routes", "r.json"])).is_err());
    }

    #[test]
    fn test_parse_comments() {
        let cmd = parse_args_from(&args(&["comments", "c.json", "--scroll", "c7"])).unwrap();
        assert_eq!(
            cmd,
            Command::Comments {
                comments_file: PathBuf::from("c.json"),
                scroll_to: Some("c7".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_soql() {
        let cmd = parse_args_from(&args(&["soql", "Account", "Id, Name", "--limit", "5"])).unwrap();
        assert_eq!(
            cmd,
            Command::Soql {
                object: "Account".to_string(),
                fields: vec!["Id".to_string(), "Name".to_string()],
                limit: Some(5),
            }
        );

        assert!(parse_args_from(&args(&["soql", "Account", "Id", "--limit", "many"])).is_err());
    }

    #[test]
    fn test_parse_help_and_unknown() {
        assert_eq!(parse_args_from(&[]).unwrap(), Command::Help);
        assert_eq!(parse_args_from(&args(&["--help"])).unwrap(), Command::Help);
        assert!(parse_args_from(&args(&["deploy"])).is_err());
    }
}
