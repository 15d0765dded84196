use std::fmt;
use std::str::FromStr;

/// Normalized path: the segments between the forward solidi,
/// with `.` and `..` already applied.
///
/// The [`FromStr`] impl takes [`str`],
/// rather than [`Path`][`std::path::Path`],
/// as our paths are always encoded as UTF-8,
/// and always use forward solidi as path separators.
/// Leading, trailing, and repeated solidi are insignificant.
/// Segments are otherwise kept verbatim;
/// in particular `sequenced files` contains a space.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ParsedPath
{
    segments: Vec<String>,
}

impl ParsedPath
{
    /// Parse a path from its sequence of components.
    ///
    /// Path components are the strings between the forward solidi.
    /// This function ignores empty components and `.`,
    /// and lets `..` remove the component before it.
    /// It returns [`None`] if `..` would climb above the root.
    pub fn from_components<'a>(components: impl IntoIterator<Item=&'a str>)
        -> Option<Self>
    {
        let mut segments = Vec::new();
        for component in components {
            match component {
                "" | "." => (),
                ".."     => { segments.pop()?; },
                _        => segments.push(component.to_string()),
            }
        }
        Some(Self{segments})
    }

    pub fn segments(&self) -> &[String]
    {
        &self.segments
    }

    pub fn is_root(&self) -> bool
    {
        self.segments.is_empty()
    }

    /// The path of `other` taken relative to `self`.
    pub fn join(&self, other: &ParsedPath) -> Self
    {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Self{segments}
    }
}

/// Returned when a path could not be parsed
/// because it climbs above the root.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PathEscapesRoot;

impl fmt::Display for PathEscapesRoot
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    {
        f.write_str("path climbs above the root")
    }
}

impl FromStr for ParsedPath
{
    type Err = PathEscapesRoot;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        Self::from_components(s.split('/'))
            .ok_or(PathEscapesRoot)
    }
}

impl fmt::Display for ParsedPath
{
    /// Format as an absolute path, `/` for the root.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}
