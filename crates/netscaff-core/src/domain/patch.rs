//! Marker-region insertion.
//!
//! Generated files carry comment-delimited regions:
//!
//! ```text
//!     // netscaff:dbsets:begin
//!     public DbSet<Product> Products => Set<Product>();
//!     // netscaff:dbsets:end
//! ```
//!
//! Later steps append registration lines inside a region. Insertion is
//! idempotent: a line whose whitespace-normalised form already appears
//! anywhere in the file is not added again.

use std::fmt;

use crate::domain::error::DomainError;

/// Named insertion regions in generated files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerRegion {
    /// `using` directives at the top of the ORM context.
    Usings,
    /// `DbSet` properties of the ORM context.
    DbSets,
    /// Repository registrations in the infrastructure DI file.
    Repositories,
}

impl MarkerRegion {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Usings => "usings",
            Self::DbSets => "dbsets",
            Self::Repositories => "repositories",
        }
    }

    pub fn begin_marker(&self) -> String {
        format!("// netscaff:{}:begin", self.name())
    }

    pub fn end_marker(&self) -> String {
        format!("// netscaff:{}:end", self.name())
    }
}

impl fmt::Display for MarkerRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of [`insert_into_region`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The full rewritten text.
    Inserted(String),
    /// An equivalent line exists; the text is unchanged.
    AlreadyPresent,
}

/// Insert `line` at the end of `region`, indented like the begin marker.
///
/// Without an end marker the line goes directly after the begin marker.
/// The file's line-ending style and trailing newline are preserved.
pub fn insert_into_region(
    text: &str,
    region: MarkerRegion,
    line: &str,
) -> Result<PatchOutcome, DomainError> {
    let wanted = normalize(line);
    if text.lines().any(|existing| normalize(existing) == wanted) {
        return Ok(PatchOutcome::AlreadyPresent);
    }

    let begin = region.begin_marker();
    let end = region.end_marker();
    let lines: Vec<&str> = text.lines().collect();

    let begin_idx = lines
        .iter()
        .position(|l| l.trim() == begin)
        .ok_or_else(|| DomainError::MarkerNotFound {
            marker: begin.clone(),
        })?;

    let insert_at = lines[begin_idx + 1..]
        .iter()
        .position(|l| l.trim() == end)
        .map_or(begin_idx + 1, |offset| begin_idx + 1 + offset);

    let marker_line = lines[begin_idx];
    let indent = &marker_line[..marker_line.len() - marker_line.trim_start().len()];
    let new_line = format!("{indent}{}", line.trim());

    let newline = if text.contains("\r\n") { "\r\n" } else { "\n" };
    let mut out: Vec<&str> = Vec::with_capacity(lines.len() + 1);
    out.extend_from_slice(&lines[..insert_at]);
    out.push(&new_line);
    out.extend_from_slice(&lines[insert_at..]);

    let mut patched = out.join(newline);
    if text.ends_with('\n') {
        patched.push_str(newline);
    }
    Ok(PatchOutcome::Inserted(patched))
}

fn normalize(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}
