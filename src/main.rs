use clap::Parser as _;
use reading_focus::config::{Config, FocusMode};
use reading_focus::entities::{EntityResponse, QueryBuilder, RemoteOutcome};
use reading_focus::focus::simple::SimpleFocus;
use reading_focus::focus::{FocusScorer, RegionScore, Signals};
use reading_focus::parsers::{Paragraph, Parser};
use reading_focus::region::{Point, TextRegion, Viewport};
use reading_focus::results::{KeywordResult, QueryProfile};
use reading_focus::{KeywordRanker, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

mod args;
use args::{Args, Command};

#[derive(Serialize)]
struct ParagraphKeywords<'a> {
    id: &'a str,
    headline: &'a str,
    #[serde(flatten)]
    result: KeywordResult,
}

#[derive(Serialize)]
struct ParagraphQuery<'a> {
    id: &'a str,
    #[serde(flatten)]
    profile: QueryProfile,
}

#[derive(Serialize)]
struct FocusReport {
    focused: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    scores: Vec<RegionScore>,
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        ::log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_deref())?;

    match args.command {
        Command::Keywords { file, k } => keywords(&file, k, &config),
        Command::Focus {
            regions,
            width,
            height,
            scroll_top,
            scroll_left,
            pointer,
            simple,
        } => {
            let viewport = Viewport::new(width, height).scrolled_to(scroll_left, scroll_top);
            let pointer = pointer.map(|(x, y)| Point::new(x, y));
            let mut config = config;
            if simple {
                config.focus.mode = FocusMode::Simple;
            }
            focus(&regions, viewport, pointer, &config)
        }
        Command::Query { file, entities } => query(&file, entities, &config),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            ::log::info!("Loading configuration from {}", path.display());
            Config::from_file(path)
        }
        None => Ok(Config::default()),
    }
}

fn keywords(file: &Path, k: Option<usize>, config: &Config) -> Result<()> {
    let parsed = Parser::parse_file(file)?;
    let ranker = KeywordRanker::new(config.ranker.clone());
    let k = k.unwrap_or(config.ranker.default_k);

    let output: Vec<ParagraphKeywords> = parsed
        .paragraphs
        .iter()
        .map(|p| ParagraphKeywords {
            id: &p.id,
            headline: &p.headline,
            result: ranker.rank(&p.content, k),
        })
        .collect();

    print_json(&output)
}

fn focus(file: &Path, viewport: Viewport, pointer: Option<Point>, config: &Config) -> Result<()> {
    let json = std::fs::read_to_string(file)?;
    let regions: Vec<TextRegion> = serde_json::from_str(&json)?;
    ::log::info!("Scoring {} regions", regions.len());

    let report = match config.focus.mode {
        FocusMode::Simple => FocusReport {
            focused: SimpleFocus.select(&regions, &viewport).map(|r| r.id.clone()),
            scores: Vec::new(),
        },
        FocusMode::Weighted => {
            let mut signals = Signals::new(viewport);
            if let Some(pointer) = pointer {
                signals = signals.with_pointer(pointer);
            }
            let scorer = FocusScorer::from_config(&config.focus);
            let scores = scorer.score(&regions, &signals);
            FocusReport {
                focused: reading_focus::focus::best(&scores).map(|s| s.id.clone()),
                scores,
            }
        }
    };

    print_json(&report)
}

fn query(file: &Path, entities: Option<PathBuf>, config: &Config) -> Result<()> {
    let parsed = Parser::parse_file(file)?;
    let response = match entities {
        Some(path) => Some(EntityResponse::from_json(&std::fs::read_to_string(path)?)?),
        None => None,
    };
    let builder = QueryBuilder::new(KeywordRanker::new(config.ranker.clone()));

    let output: Vec<ParagraphQuery> = parsed
        .paragraphs
        .iter()
        .enumerate()
        .map(|(i, p)| ParagraphQuery {
            id: &p.id,
            profile: builder.build(&p.content, remote_for(response.as_ref(), i, p)),
        })
        .collect();

    print_json(&output)
}

/// The part of a recognition response that belongs to the `index`-th paragraph
fn remote_for(response: Option<&EntityResponse>, index: usize, paragraph: &Paragraph) -> RemoteOutcome {
    let Some(annotated) = response.and_then(|r| r.paragraphs.get(index)) else {
        return RemoteOutcome::Skipped;
    };
    ::log::debug!("Using recognized entities for {}", paragraph.id);
    RemoteOutcome::Response(EntityResponse {
        paragraphs: vec![annotated.clone()],
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
