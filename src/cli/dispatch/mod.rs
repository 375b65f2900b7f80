use crate::{
    app::routes::Route,
    cli::{
        actions::{Action, logout, open, whoami},
        commands::{ARG_ROUTE, login, session},
        globals::GlobalArgs,
    },
    config::AppConfig,
};
use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use secrecy::SecretString;
use std::{path::PathBuf, time::Duration};

/// # Errors
/// Returns an error if required arguments are missing or invalid.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some(("open", sub)) => {
            let route = sub
                .get_one::<String>(ARG_ROUTE)
                .map_or(Ok(Route::Home), |raw| raw.parse::<Route>())?;
            Ok(Action::Open(open::Args {
                globals: globals(sub)?,
                route,
                login: credentials(sub),
            }))
        }
        Some(("login", sub)) => Ok(Action::Open(open::Args {
            globals: globals(sub)?,
            route: Route::Login,
            login: credentials(sub),
        })),
        Some(("whoami", sub)) => Ok(Action::Whoami(whoami::Args {
            globals: globals(sub)?,
        })),
        Some(("logout", sub)) => Ok(Action::Logout(logout::Args {
            globals: globals(sub)?,
        })),
        Some((name, _)) => bail!("unknown command: {name}"),
        None => bail!("missing command"),
    }
}

fn globals(matches: &ArgMatches) -> Result<GlobalArgs> {
    let api_base_url = matches
        .get_one::<String>(session::ARG_API_BASE_URL)
        .context("missing required argument: --api-base-url")?;
    let session_dir = matches.get_one::<PathBuf>(session::ARG_SESSION_DIR).cloned();
    let timeout = matches
        .get_one::<u64>(session::ARG_TIMEOUT)
        .copied()
        .map(Duration::from_secs);

    let config = AppConfig::new(api_base_url, session_dir, timeout)
        .context("invalid configuration")?;
    Ok(GlobalArgs::new(config))
}

fn credentials(matches: &ArgMatches) -> Option<(String, SecretString)> {
    let email = matches.get_one::<String>(login::ARG_EMAIL)?;
    let password = matches.get_one::<String>(login::ARG_PASSWORD)?;
    Some((email.clone(), SecretString::from(password.clone())))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cli::commands;
    use secrecy::ExposeSecret;

    const CLEAN_ENV: [(&str, Option<&str>); 6] = [
        ("AUTHGATE_API_BASE_URL", None),
        ("AUTHGATE_SESSION_DIR", None),
        ("AUTHGATE_TIMEOUT", None),
        ("AUTHGATE_EMAIL", None),
        ("AUTHGATE_PASSWORD", None),
        ("AUTHGATE_LOG_LEVEL", None),
    ];

    fn dispatch(args: &[&str]) -> Result<Action> {
        let matches = commands::new()
            .try_get_matches_from(args.iter().copied())
            .unwrap();
        handler(&matches)
    }

    #[test]
    fn open_defaults_to_home_and_prompts() {
        temp_env::with_vars(CLEAN_ENV, || {
            let action = dispatch(&[
                "authgate",
                "open",
                "-u",
                "http://localhost:8000",
                "--session-dir",
                "/tmp/authgate",
                "--timeout",
                "4",
            ])
            .unwrap();
            let Action::Open(args) = action else {
                panic!("expected open");
            };
            assert_eq!(args.route, Route::Home);
            assert!(args.login.is_none());
            assert_eq!(args.globals.config.api_base_url, "http://localhost:8000");
            assert_eq!(args.globals.config.session_dir, PathBuf::from("/tmp/authgate"));
            assert_eq!(args.globals.config.timeout, Duration::from_secs(4));
        });
    }

    #[test]
    fn login_starts_on_the_form_with_credentials() {
        temp_env::with_vars(CLEAN_ENV, || {
            let action = dispatch(&[
                "authgate",
                "-u",
                "http://localhost:8000",
                "login",
                "--email",
                "ana@example.com",
                "--password",
                "pw",
            ])
            .unwrap();
            let Action::Open(args) = action else {
                panic!("expected open");
            };
            assert_eq!(args.route, Route::Login);
            let (email, password) = args.login.unwrap();
            assert_eq!(email, "ana@example.com");
            assert_eq!(password.expose_secret(), "pw");
        });
    }

    #[test]
    fn unknown_route_is_rejected() {
        temp_env::with_vars(CLEAN_ENV, || {
            let result = dispatch(&["authgate", "open", "/admin", "-u", "http://localhost:8000"]);
            assert!(result.is_err());
        });
    }

    #[test]
    fn missing_base_url_is_an_error() {
        temp_env::with_vars(CLEAN_ENV, || {
            let err = dispatch(&["authgate", "whoami"]).err().unwrap();
            assert!(err.to_string().contains("--api-base-url"));
        });
    }

    #[test]
    fn invalid_base_url_is_an_error() {
        temp_env::with_vars(CLEAN_ENV, || {
            let err = dispatch(&["authgate", "logout", "-u", "ftp://files.tld"])
                .err()
                .unwrap();
            assert_eq!(err.to_string(), "invalid configuration");
            assert!(format!("{err:#}").contains("unsupported scheme ftp"));
        });
    }
}
