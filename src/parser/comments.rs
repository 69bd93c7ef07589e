//! Comment tag scanner: declared metadata from `## @param` style lines.
//!
//! Every line is tested against all four tag patterns in the order
//! param → section → skip → extra, so a line matching several patterns
//! yields one record per match. Lines that match nothing are ordinary
//! file content; a malformed tag line is never an error.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::Parameter;
use regex::{Captures, Regex};
use serde_yaml::Value;

// -- Pattern compilation ------------------------------------------------------

/// Path, optional `[modifier]` and description after a param or extra tag.
/// Groups are named so that groups inside the configured format or tag
/// fragments do not shift them.
const TAGGED_PATH: &str = r"(?P<path>\S+)\s*(?P<modifier>\[.*?\])?\s*(?P<description>.*)";

/// Tag patterns compiled once from a [`Config`].
#[derive(Debug, Clone)]
pub struct TagMatchers {
    param: Regex,
    section: Regex,
    skip: Regex,
    extra: Regex,
}

impl TagMatchers {
    pub fn compile(config: &Config) -> Result<Self> {
        let format = &config.comments.format;
        let tags = &config.tags;
        Ok(Self {
            param: build("param", format!(r"^\s*{format}\s*{}\s*{TAGGED_PATH}$", tags.param))?,
            section: build(
                "section",
                format!(r"^\s*{format}\s*{}\s*(?P<section>.*)$", tags.section),
            )?,
            skip: build("skip", format!(r"^\s*{format}\s*{}\s*(?P<path>\S+)", tags.skip))?,
            extra: build("extra", format!(r"^\s*{format}\s*{}\s*{TAGGED_PATH}$", tags.extra))?,
        })
    }

    /// Scan a whole file, returning declared records in file order.
    pub fn scan(&self, input: &str) -> Vec<Parameter> {
        input
            .lines()
            .fold(ScanState::default(), |state, line| self.process_line(state, line))
            .params
    }

    fn process_line(&self, mut state: ScanState, line: &str) -> ScanState {
        if let Some(caps) = self.param.captures(line) {
            let mut param = Parameter::new(text(&caps, "path"));
            param.modifier = modifier(&caps);
            param.description = text(&caps, "description");
            param.section = state.current_section.clone();
            state.params.push(param);
        }

        if let Some(caps) = self.section.captures(line) {
            state.current_section = text(&caps, "section");
        }

        if let Some(caps) = self.skip.captures(line) {
            let mut param = Parameter::new(text(&caps, "path"));
            param.skip = true;
            param.section = state.current_section.clone();
            state.params.push(param);
        }

        if let Some(caps) = self.extra.captures(line) {
            let mut param = Parameter::new(text(&caps, "path"));
            param.description = text(&caps, "description");
            param.value = Some(Value::String(String::new()));
            param.extra = true;
            param.section = state.current_section.clone();
            state.params.push(param);
        }

        state
    }
}

fn build(tag: &'static str, pattern: String) -> Result<Regex> {
    Regex::new(&pattern).map_err(|source| Error::Pattern { tag, source })
}

// -- Scan state ---------------------------------------------------------------

/// Accumulator threaded through the line fold.
#[derive(Default)]
struct ScanState {
    current_section: String,
    params: Vec<Parameter>,
}

// -- Capture helpers ----------------------------------------------------------

fn text(caps: &Captures, group: &str) -> String {
    caps.name(group)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// `[default: 3]` → `default: 3`
fn modifier(caps: &Captures) -> String {
    caps.name("modifier")
        .map(|m| {
            let raw = m.as_str();
            raw.trim_start_matches('[')
                .trim_end_matches(']')
                .to_string()
        })
        .unwrap_or_default()
}

/// Compile the configured patterns and scan `input` in one step.
pub fn parse(input: &str, config: &Config) -> Result<Vec<Parameter>> {
    Ok(TagMatchers::compile(config)?.scan(input))
}
