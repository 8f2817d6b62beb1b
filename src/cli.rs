//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "news-annotator",
    about = "Linguistic annotation of news article corpora. Runs `annotate` with defaults when no subcommand is given."
)]
pub struct NewsAnnotator {
    #[structopt(subcommand)]
    pub cmd: Option<Command>,
}

#[derive(Debug, StructOpt)]
pub enum Command {
    #[structopt(about = "Analyze and rewrite every article of a corpus")]
    Annotate(Annotate),
    #[structopt(about = "Count lemmas of an annotated corpus")]
    Count(Count),
}

#[derive(Debug, StructOpt)]
/// Annotate command and parameters.
///
/// ```sh
/// news-annotator-annotate 0.1.0
/// Analyze and rewrite every article of a corpus
///
/// USAGE:
///     news-annotator annotate [OPTIONS]
///
/// OPTIONS:
///         --src <src>                    corpus root. Defaults to $HOME/dump
///         --ledger <ledger>              processed files ledger [default: processed_files.txt]
///         --lang <lang>                  analysis language [default: es]
///         --resources <resources>        FreeLing data root [default: /usr/share/freeling/]
///         --analyzer-bin <analyzer-bin>  FreeLing analyzer executable [default: analyze]
///     -t, --threads <threads>            number of workers. Defaults to the number of cores
///         --timeout <timeout>            analyzer timeout per field, in seconds
/// ```
pub struct Annotate {
    #[structopt(
        long = "src",
        parse(from_os_str),
        help = "corpus root. Defaults to $HOME/dump"
    )]
    pub src: Option<PathBuf>,
    #[structopt(
        long = "ledger",
        parse(from_os_str),
        default_value = "processed_files.txt",
        help = "processed files ledger"
    )]
    pub ledger: PathBuf,
    #[structopt(long = "lang", default_value = "es", help = "analysis language")]
    pub lang: String,
    #[structopt(
        long = "resources",
        parse(from_os_str),
        default_value = "/usr/share/freeling/",
        help = "FreeLing data root"
    )]
    pub resources: PathBuf,
    #[structopt(
        long = "analyzer-bin",
        parse(from_os_str),
        default_value = "analyze",
        help = "FreeLing analyzer executable"
    )]
    pub analyzer_bin: PathBuf,
    #[structopt(
        short = "t",
        long = "threads",
        help = "number of workers. Defaults to the number of cores"
    )]
    pub threads: Option<usize>,
    #[structopt(long = "timeout", help = "analyzer timeout per field, in seconds")]
    pub timeout: Option<u64>,
}

impl Default for Annotate {
    fn default() -> Self {
        Self::from_iter(["annotate"])
    }
}

#[derive(Debug, StructOpt)]
/// Count command and parameters.
pub struct Count {
    #[structopt(parse(from_os_str), help = "annotated corpus location")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "destination csv file")]
    pub dst: PathBuf,
    #[structopt(
        short = "r",
        long = "reduced",
        help = "count lemmatized_text_reduced instead of lemmatized_text"
    )]
    pub reduced: bool,
    #[structopt(
        long = "stopwords",
        parse(from_os_str),
        help = "file of words to leave out, one per line"
    )]
    pub stopwords: Option<PathBuf>,
}
