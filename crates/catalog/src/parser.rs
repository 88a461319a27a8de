//! Parser for catalog data files.
//!
//! Both files use one record per line with `::` separated fields:
//! - actors.dat: actorId::name::img
//! - credits.dat: actorId::titleId::title::year::link::character::episodes
//!
//! Optional fields (img, year, link, episodes) are left empty when absent.

use crate::error::{CatalogError, Result};
use crate::types::*;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read a file as ISO-8859-1 (Latin-1).
///
/// Every byte maps directly to the Unicode code point of the same value, so
/// this never fails on encoding and is lossless for plain UTF-8 ASCII.
fn read_lines_latin1(path: &Path) -> Result<Vec<String>> {
    let mut file = File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;

    let content: String = bytes.iter().map(|&b| b as char).collect();

    Ok(content.lines().map(|s| s.to_string()).collect())
}

/// Splits one `::` line and hands out fields with file/line context
struct Fields<'a> {
    file: &'static str,
    line: usize,
    parts: std::str::Split<'a, &'static str>,
}

impl<'a> Fields<'a> {
    fn new(file: &'static str, line: usize, text: &'a str) -> Self {
        Self {
            file,
            line,
            parts: text.split("::"),
        }
    }

    fn error(&self, reason: impl Into<String>) -> CatalogError {
        CatalogError::ParseError {
            file: self.file.to_string(),
            line: self.line,
            reason: reason.into(),
        }
    }

    /// Next mandatory, non-empty field
    fn required(&mut self, name: &str) -> Result<&'a str> {
        match self.parts.next().map(str::trim) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(self.error(format!("Missing {}", name))),
        }
    }

    /// Next field that must be present but may be empty
    fn text(&mut self, name: &str) -> Result<&'a str> {
        self.parts
            .next()
            .map(str::trim)
            .ok_or_else(|| self.error(format!("Missing {}", name)))
    }

    /// Next field, empty meaning `None`
    fn optional(&mut self, name: &str) -> Result<Option<&'a str>> {
        let value = self.text(name)?;
        Ok((!value.is_empty()).then_some(value))
    }

    fn optional_number<T: std::str::FromStr>(&mut self, name: &str) -> Result<Option<T>>
    where
        T::Err: std::fmt::Display,
    {
        match self.optional(name)? {
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|e| self.error(format!("Invalid {}: {}", name, e))),
            None => Ok(None),
        }
    }

    fn finish(mut self) -> Result<()> {
        match self.parts.next() {
            Some(_) => Err(self.error("Unexpected trailing field")),
            None => Ok(()),
        }
    }
}

/// Parse the actors.dat file
///
/// Format: actorId::name::img
pub fn parse_actors(path: &Path) -> Result<Vec<ActorProfile>> {
    let lines = read_lines_latin1(path)?;
    parse_actor_lines(&lines)
}

fn parse_actor_lines(lines: &[String]) -> Result<Vec<ActorProfile>> {
    let mut actors = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let mut fields = Fields::new("actors.dat", idx + 1, line_trimmed);
        let id = fields.required("actorId")?;
        let name = fields.required("name")?;
        let img = fields.optional("img")?;
        fields.finish()?;

        actors.push(ActorProfile {
            id: id.to_string(),
            name: name.to_string(),
            img: img.map(str::to_string),
        });
    }

    Ok(actors)
}

/// Parse the credits.dat file
///
/// Format: actorId::titleId::title::year::link::character::episodes
///
/// Credits are denormalized the way upstream exports them: every credit
/// carries its own copy of the title and year.
pub fn parse_credits(path: &Path) -> Result<Vec<(ActorId, FilmographyEntry)>> {
    let lines = read_lines_latin1(path)?;
    parse_credit_lines(&lines)
}

fn parse_credit_lines(lines: &[String]) -> Result<Vec<(ActorId, FilmographyEntry)>> {
    let mut credits = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let mut fields = Fields::new("credits.dat", idx + 1, line_trimmed);
        let actor_id = fields.required("actorId")?;
        let title_id = fields.required("titleId")?;
        let title = fields.required("title")?;
        let year = fields.optional_number::<u16>("year")?;
        let link = fields.optional("link")?;
        let character = fields.text("character")?;
        let episode_count = fields.optional_number::<u32>("episodes")?;
        fields.finish()?;

        credits.push((
            actor_id.to_string(),
            FilmographyEntry {
                title_id: title_id.to_string(),
                title: title.to_string(),
                year,
                link: link.map(str::to_string),
                character: character.to_string(),
                episode_count,
            },
        ));
    }

    Ok(credits)
}
