use crate::cli::actions::Action;
use anyhow::Result;

/// Default request timeout for the console, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    Ok(Action::Console {
        api_url: matches
            .get_one("api-url")
            .map(|s: &String| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --api-url"))?,
        timeout: matches
            .get_one::<u64>("timeout")
            .copied()
            .unwrap_or(DEFAULT_TIMEOUT_SECS),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;

    #[test]
    fn builds_console_action_from_args() -> Result<()> {
        let matches = commands::new().get_matches_from(vec![
            "crossbox",
            "--api-url",
            "https://api.crossbox.fit",
            "--timeout",
            "3",
        ]);

        assert_eq!(
            handler(&matches)?,
            Action::Console {
                api_url: "https://api.crossbox.fit".to_string(),
                timeout: 3,
            }
        );
        Ok(())
    }

    #[test]
    fn defaults_apply_without_args() -> Result<()> {
        temp_env::with_vars(
            [
                ("CROSSBOX_API_URL", None::<&str>),
                ("CROSSBOX_TIMEOUT", None::<&str>),
            ],
            || -> Result<()> {
                let matches = commands::new().get_matches_from(vec!["crossbox"]);
                assert_eq!(
                    handler(&matches)?,
                    Action::Console {
                        api_url: "http://localhost:4000".to_string(),
                        timeout: DEFAULT_TIMEOUT_SECS,
                    }
                );
                Ok(())
            },
        )
    }
}
