// cli.rs - Command-line interface configuration
use clap::{Args, Parser, Subcommand};

use crate::scene::Variant;
use crate::site::Category;

pub const DEFAULT_WIDTH: u32 = 1280;
pub const DEFAULT_HEIGHT: u32 = 720;

#[derive(Parser, Debug, Clone)]
#[command(name = "aura-studio")]
#[command(about = "Aura design studio: interactive 3D space, chat assistant and portfolio data", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// The chosen subcommand, `show` with defaults when none was given
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Show(ShowArgs::default()))
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open a window with the interactive space (keys 1/2/3 switch variant, Tab chats, Escape quits)
    Show(ShowArgs),
    /// Chat with the design assistant in the terminal
    Chat,
    /// Print the project catalogue as JSON
    Projects {
        #[arg(long, value_enum)]
        category: Option<Category>,
    },
    /// Print the site's routes
    Routes,
    /// Run a simulated contact-form submission
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ShowArgs {
    /// Scene variant (also accepts hero, interior, graphic)
    #[arg(long, value_enum, default_value_t = Variant::Primary)]
    pub variant: Variant,

    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: u32,

    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: u32,

    /// Seed for the starfield; random when absent
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Default for ShowArgs {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_show() {
        let cli = Cli::try_parse_from(["aura-studio"]).unwrap();
        assert_eq!(cli.command(), Command::Show(ShowArgs::default()));
    }

    #[test]
    fn test_show_accepts_page_alias() {
        let cli = Cli::try_parse_from(["aura-studio", "show", "--variant", "graphic", "--seed", "7"]).unwrap();
        let Command::Show(args) = cli.command() else {
            panic!("expected show");
        };
        assert_eq!(args.variant, Variant::Tertiary);
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.width, DEFAULT_WIDTH);
    }

    #[test]
    fn test_projects_category() {
        let cli = Cli::try_parse_from(["aura-studio", "projects", "--category", "interior"]).unwrap();
        assert_eq!(cli.command(), Command::Projects { category: Some(Category::Interior) });
    }

    #[test]
    fn test_contact_requires_fields() {
        assert!(Cli::try_parse_from(["aura-studio", "contact", "--name", "Ada"]).is_err());
    }
}
