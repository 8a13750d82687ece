use std::path::PathBuf;

use clap::Parser;
use url::Url;

use crate::editor;

#[derive(Parser, Debug)]
#[command(name = "editor-verify")]
#[command(about = "End-to-end verification of the visual graph editor")]
#[command(version)]
pub struct Cli {
    /// Address the editor page is served at
    #[arg(long, value_name = "URL", value_parser = parse_url, default_value = editor::DEFAULT_URL)]
    pub url: Url,

    /// Directory screenshots are written to
    #[arg(long, value_name = "DIR", default_value = "verification")]
    pub output_dir: PathBuf,

    /// Run with a visible browser window instead of headless
    #[arg(long)]
    pub headed: bool,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

fn parse_url(raw: &str) -> Result<Url, url::ParseError> {
    Url::parse(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bare_invocation_uses_fixed_defaults() {
        let cli = Cli::try_parse_from(["editor-verify"]).unwrap();

        assert_eq!(cli.url.as_str(), editor::DEFAULT_URL);
        assert_eq!(cli.output_dir, PathBuf::from("verification"));
        assert!(!cli.headed);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn parse_overrides() {
        let args = vec![
            "editor-verify",
            "--url",
            "http://127.0.0.1:9000/EditorMain.html",
            "--output-dir",
            "/tmp/shots",
            "--headed",
            "-vv",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        assert_eq!(cli.url.as_str(), "http://127.0.0.1:9000/EditorMain.html");
        assert_eq!(cli.output_dir, PathBuf::from("/tmp/shots"));
        assert!(cli.headed);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn reject_relative_url() {
        let result = Cli::try_parse_from(["editor-verify", "--url", "EditorMain.html"]);
        assert!(result.is_err());
    }
}
