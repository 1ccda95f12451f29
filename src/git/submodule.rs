//! Submodule declaration discovery (`.gitmodules`).
//!
//! Only `path` and `url` are read from each `[submodule "..."]` block; other
//! keys are ignored. Results are sorted by path.

use std::path::Path;

use crate::error::Result;

pub const GITMODULES_FILE: &str = ".gitmodules";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmoduleDeclaration {
    pub path: String,
    pub url: String,
}

pub fn discover(root: &Path) -> Result<Vec<SubmoduleDeclaration>> {
    let file = root.join(GITMODULES_FILE);
    if !file.is_file() {
        return Ok(Vec::new());
    }
    let contents = std::fs::read_to_string(&file)?;
    Ok(parse_gitmodules(&contents))
}

pub fn parse_gitmodules(contents: &str) -> Vec<SubmoduleDeclaration> {
    let mut declarations = Vec::new();
    let mut path: Option<String> = None;
    let mut url: Option<String> = None;

    let mut flush = |path: &mut Option<String>, url: &mut Option<String>| {
        if let (Some(p), Some(u)) = (path.take(), url.take()) {
            declarations.push(SubmoduleDeclaration { path: p, url: u });
        }
    };

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if line.starts_with('[') {
            flush(&mut path, &mut url);
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim().trim_matches('"').to_string();
        match key.trim() {
            "path" => path = Some(value),
            "url" => url = Some(value),
            _ => {}
        }
    }
    flush(&mut path, &mut url);

    declarations.sort_by(|a, b| a.path.cmp(&b.path));
    declarations
}
