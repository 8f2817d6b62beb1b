//! # news-annotator
//!
//! Batch annotation of news article corpora with lemmas, named entities,
//! dates and numbers.
//!
//! ```sh
//! news-annotator 0.1.0
//! Linguistic annotation of news article corpora.
//!
//! USAGE:
//!     news-annotator [SUBCOMMAND]
//!
//! SUBCOMMANDS:
//!     annotate    Analyze and rewrite every article of a corpus
//!     count       Count lemmas of an annotated corpus
//!     help        Prints this message or the help of the given subcommand(s)
//! ```
//!
//! Running without a subcommand annotates `$HOME/dump` using a stock FreeLing install.
//!
//! Progress and the end of run report are logged at `info` level, which is the
//! default. Use `RUST_LOG` to change it.
use std::path::PathBuf;
use std::time::Duration;

use news_annotator::engine::{Freeling, FreelingBuilder};
use news_annotator::error::Error;
use news_annotator::pipelines::{AnnotatePipeline, Cancel, Pipeline};
use news_annotator::processing::count;
use structopt::StructOpt;

#[macro_use]
extern crate log;

mod cli;

/// Logger reading its filter from `env`, `info` when unset.
fn logger(env: env_logger::Env) -> env_logger::Builder {
    env_logger::Builder::from_env(env.default_filter_or("info"))
}

/// `$HOME/dump`
fn default_src() -> Result<PathBuf, Error> {
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join("dump"))
        .ok_or_else(|| Error::Config("HOME is not set and no --src was given".to_string()))
}

async fn annotate(opt: cli::Annotate) -> Result<(), Error> {
    let src = match opt.src {
        Some(src) => src,
        None => default_src()?,
    };

    let engine = FreelingBuilder::default()
        .bin(&opt.analyzer_bin)
        .resources(&opt.resources)
        .lang(&opt.lang)
        .timeout(opt.timeout.map(Duration::from_secs))
        .build()?;

    let cancel = Cancel::default();
    let pipeline = AnnotatePipeline::new(src, opt.ledger, engine)
        .threads(opt.threads)
        .cancel(cancel.clone());

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted: no new file will be started");
            cancel.cancel();
        }
    });

    info!("news-annotator {}", AnnotatePipeline::<Freeling>::version());
    let summary = tokio::task::spawn_blocking(move || pipeline.run())
        .await
        .map_err(|e| Error::Custom(format!("annotation task failed: {}", e)))??;

    summary.log();
    if !summary.is_success() {
        return Err(Error::Custom(format!(
            "{} files could not be annotated, see previous messages.",
            summary.failures.len()
        )));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger(env_logger::Env::default()).init();

    let opt = cli::NewsAnnotator::from_args();
    debug!("cli args\n{:#?}", opt);

    let cmd = opt
        .cmd
        .unwrap_or_else(|| cli::Command::Annotate(cli::Annotate::default()));

    match cmd {
        cli::Command::Annotate(a) => annotate(a).await?,
        cli::Command::Count(c) => {
            let text = if c.reduced {
                count::Text::Reduced
            } else {
                count::Text::Full
            };
            count::count(&c.src, &c.dst, text, c.stopwords.as_deref())?;
        }
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use log::LevelFilter;

    use super::logger;

    #[test]
    fn info_by_default() {
        let env = env_logger::Env::new().filter("NEWS_ANNOTATOR_UNSET_LOG_FILTER");
        assert_eq!(logger(env).build().filter(), LevelFilter::Info);
    }

    #[test]
    fn filter_is_overridable() {
        std::env::set_var("NEWS_ANNOTATOR_DEBUG_LOG_FILTER", "debug");
        let env = env_logger::Env::new().filter("NEWS_ANNOTATOR_DEBUG_LOG_FILTER");
        assert_eq!(logger(env).build().filter(), LevelFilter::Debug);
    }
}
