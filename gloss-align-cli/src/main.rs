use clap::{Arg, Command};
use gloss_align::{
    AlignConfig, GoogleTranslateProvider, InMemoryDictionary, Lookup, LookupRequest,
    LookupSession, MachineTranslator, MatchedWord, MockMode, MockTranslator,
};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("gloss-align")
        .version("0.1.0")
        .about("Pick the translation of a word that fits its sentence")
        .arg(
            Arg::new("word")
                .help("Selected word")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("sentence")
                .help("Sentence the word appears in")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::new("source")
                .long("source")
                .short('s')
                .help("Source language code (e.g., es)")
                .required(true),
        )
        .arg(
            Arg::new("target")
                .long("target")
                .short('t')
                .help("Target language code (e.g., en)")
                .required(true),
        )
        .arg(
            Arg::new("translation")
                .long("translation")
                .help("Translated sentence to use instead of asking machine translation"),
        )
        .arg(
            Arg::new("dictionary")
                .long("dictionary")
                .short('d')
                .help("JSON file with dictionary entries"),
        )
        .arg(
            Arg::new("mock")
                .long("mock")
                .short('m')
                .help("Use mock translator instead of Google Translate")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("timeout-ms")
                .long("timeout-ms")
                .help("Machine translation wait in milliseconds")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Show debug logs")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let word = required(&matches, "word")?;
    let sentence = required(&matches, "sentence")?;
    let source = required(&matches, "source")?;
    let target = required(&matches, "target")?;
    let verbose = matches.get_flag("verbose");

    let level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = AlignConfig::from_env()?;
    if let Some(timeout_ms) = matches.get_one::<u64>("timeout-ms") {
        config.translation_timeout_ms = *timeout_ms;
    }
    debug!(?config, "Configuration");

    let dictionary = match matches.get_one::<String>("dictionary") {
        Some(path) => InMemoryDictionary::from_json_file(Path::new(path))?,
        None => InMemoryDictionary::new(),
    };
    if dictionary.is_empty() {
        eprintln!("⚠️  Dictionary is empty, only machine translation will be offered");
    }

    let translator: Arc<dyn MachineTranslator> = if matches.get_flag("mock") {
        Arc::new(MockTranslator::new(MockMode::Echo))
    } else {
        match GoogleTranslateProvider::from_env() {
            Ok(provider) => Arc::new(provider),
            Err(e) => {
                eprintln!("❌ {}", e);
                eprintln!("   Set it with: export GOOGLE_TRANSLATE_API_KEY=your_api_key");
                eprintln!("   Or use --mock to use mock translator");
                return Err(e.into());
            }
        }
    };

    let mut request = LookupRequest::new(word, sentence, source, target);
    if let Some(translation) = matches.get_one::<String>("translation") {
        request = request.with_translation(translation);
    }

    if verbose {
        println!("📝 \"{}\" in \"{}\"", word, sentence);
        println!("🌍 {} → {}", source, target);
        println!();
    }

    let lookup = Lookup::new(Arc::new(dictionary), translator, config);
    let session = lookup.run(&request).await?;
    print_session(&session);

    Ok(())
}

fn required<'a>(
    matches: &'a clap::ArgMatches,
    name: &str,
) -> Result<&'a str, Box<dyn std::error::Error>> {
    matches
        .get_one::<String>(name)
        .map(|s| s.as_str())
        .ok_or_else(|| format!("missing argument: {}", name).into())
}

fn print_session(session: &LookupSession) {
    let Some(ranking) = session.ranking() else {
        println!("No candidates found for \"{}\"", session.context().selected_word());
        return;
    };

    let mode = if ranking.is_scored() { "scored" } else { "unscored" };
    println!("Candidates ({}):", mode);
    for (i, candidate) in ranking.cycle_order().iter().enumerate() {
        let gloss = candidate
            .candidate
            .context
            .as_deref()
            .map(|c| format!(" ({})", c))
            .unwrap_or_default();
        println!(
            "  {:>2}. {:<20} {:.3}  [{}]{}",
            i + 1,
            candidate.text(),
            candidate.final_score(),
            candidate.candidate.source,
            gloss
        );
    }

    if let Some(text) = session.display_text() {
        println!();
        println!("✅ {}", text);
    }

    if let Some(translation) = session.context().translation() {
        match session.highlight() {
            Some(matched) => println!("   {}", bracket(&translation.text, matched)),
            None => println!("   {}", translation.text),
        }
    }
}

/// Sentence with the matched word wrapped in brackets
fn bracket(sentence: &str, matched: &MatchedWord) -> String {
    match (sentence.get(..matched.start), sentence.get(matched.end..)) {
        (Some(before), Some(after)) => format!("{}[{}]{}", before, matched.text, after),
        _ => sentence.to_string(),
    }
}
