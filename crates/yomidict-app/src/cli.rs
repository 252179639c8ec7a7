use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use yomidict_config::Config;

#[derive(Parser)]
#[command(name = "yomidict")]
#[command(about = "Build word-frequency dictionaries from Japanese text")]
pub struct Cli {
    /// JSON config file; environment overrides are ignored when given
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Vibrato system dictionary (`.dic` or `.dic.zst`)
    #[arg(long, global = true)]
    pub dictionary: Option<String>,

    /// NFKC-fold text before filtering
    #[arg(long, global = true, default_value_t = false)]
    pub fold_width: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Count words in the given files and write the frequency archive
    Build(BuildArgs),
    /// Print the cleaned text of one file
    Extract { file: PathBuf },
}

#[derive(Args)]
pub struct BuildArgs {
    /// Dictionary title
    #[arg(long)]
    pub name: Option<String>,

    /// Archive path; `.zip` is appended when missing
    #[arg(short, long)]
    pub output: PathBuf,

    /// Skip files that cannot be processed instead of aborting
    #[arg(long, default_value_t = false)]
    pub lenient: bool,

    /// Keep raw document counts instead of fractions
    #[arg(long, default_value_t = false)]
    pub no_normalize: bool,

    /// Only rank and frequency in each entry
    #[arg(long, default_value_t = false)]
    pub no_presence: bool,

    #[arg(long, default_value_t = false)]
    pub abbreviate_rank: bool,

    #[arg(long, default_value_t = false)]
    pub abbreviate_frequency: bool,

    /// Abbreviate both rank and frequency
    #[arg(long, default_value_t = false)]
    pub abbreviate: bool,

    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

impl Cli {
    /// Flags that apply to every subcommand
    pub fn apply(&self, config: &mut Config) {
        if let Some(dictionary) = &self.dictionary {
            config.analyzer.dictionary_path = dictionary.clone();
        }
        if self.fold_width {
            config.extract.fold_width = true;
        }
    }
}

impl BuildArgs {
    pub fn apply(&self, config: &mut Config) {
        if let Some(name) = &self.name {
            config.save.name = name.clone();
        }
        if self.lenient {
            config.feed.skip_failed_files = true;
        }
        if self.no_normalize {
            config.feed.normalize_presence = false;
        }
        if self.no_presence {
            config.save.include_presence = false;
        }
        config.save.abbreviate_rank |= self.abbreviate_rank;
        config.save.abbreviate_frequency |= self.abbreviate_frequency;
        config.save.abbreviate_all |= self.abbreviate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("yomidict").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn build_flags_override_config() {
        let cli = parse(&[
            "--dictionary",
            "unidic.dic.zst",
            "build",
            "--name",
            "Anime",
            "-o",
            "anime",
            "--lenient",
            "--no-presence",
            "--abbreviate",
            "a.srt",
            "b.ass",
        ]);

        let mut config = Config::default();
        cli.apply(&mut config);
        let Command::Build(args) = &cli.command else {
            panic!("expected build");
        };
        args.apply(&mut config);

        assert_eq!(config.analyzer.dictionary_path, "unidic.dic.zst");
        assert_eq!(config.save.name, "Anime");
        assert!(config.feed.skip_failed_files);
        assert!(config.feed.normalize_presence);
        assert!(!config.save.include_presence);
        assert!(config.save.rank_abbreviated());
        assert!(config.save.frequency_abbreviated());
        assert_eq!(args.output, PathBuf::from("anime"));
        assert_eq!(args.files.len(), 2);
    }

    #[test]
    fn absent_flags_keep_config() {
        let cli = parse(&["build", "-o", "out.zip", "a.txt"]);
        let mut config = Config::default();
        config.feed.skip_failed_files = true;
        config.save.name = "From file".to_string();

        cli.apply(&mut config);
        if let Command::Build(args) = &cli.command {
            args.apply(&mut config);
        }
        assert!(config.feed.skip_failed_files);
        assert_eq!(config.save.name, "From file");
        assert!(!config.save.rank_abbreviated());
    }

    #[test]
    fn build_requires_files() {
        let args = ["yomidict", "build", "-o", "out"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn extract_takes_one_file() {
        let cli = parse(&["--fold-width", "extract", "book.epub"]);
        let mut config = Config::default();
        cli.apply(&mut config);
        assert!(config.extract.fold_width);
        assert!(matches!(cli.command, Command::Extract { ref file } if file.ends_with("book.epub")));
    }
}
