//! Named matchers for the semi-structured identifiers found on resolution pages.
//!
//! Each matcher wraps one compiled regex and returns either its captures or a
//! [`PatternMismatch`], so callers never touch raw `Regex` objects.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::Arc;

/// The input did not have the shape a matcher expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMismatch {
    pub pattern: &'static str,
}

pub type MatchResult<T> = std::result::Result<T, PatternMismatch>;

/// `YYYYMMDD`, e.g. `20141230`.
#[derive(Debug, Clone)]
pub struct DateMatcher {
    regex: Regex,
}

impl DateMatcher {
    pub const NAME: &'static str = "date";
    const PATTERN: &'static str = r"^(?P<year>[0-9]{4})(?P<month>[0-9]{2})(?P<day>[0-9]{2})$";

    pub fn new() -> Self {
        Self {
            regex: Regex::new(Self::PATTERN).expect("date pattern compiles"),
        }
    }

    pub fn parse(&self, input: &str) -> MatchResult<NaiveDate> {
        let caps = self.regex.captures(input).ok_or_else(|| self.mismatch())?;
        let year = caps["year"].parse::<i32>().map_err(|_| self.mismatch())?;
        let month = caps["month"].parse::<u32>().map_err(|_| self.mismatch())?;
        let day = caps["day"].parse::<u32>().map_err(|_| self.mismatch())?;
        // Shape is right; chrono rejects impossible days like 20140230.
        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| self.mismatch())
    }

    fn mismatch(&self) -> PatternMismatch {
        PatternMismatch { pattern: Self::NAME }
    }
}

impl Default for DateMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolution page names such as `dec14R.aspx`, capturing `14R`.
#[derive(Debug, Clone)]
pub struct ResolutionNumberMatcher {
    regex: Regex,
}

impl ResolutionNumberMatcher {
    pub const NAME: &'static str = "resolution_number";
    // A single trailing newline from the page text is tolerated.
    const PATTERN: &'static str = r"^\D+(?P<number>.+?)\..*\n?$";

    pub fn new() -> Self {
        Self {
            regex: Regex::new(Self::PATTERN).expect("resolution number pattern compiles"),
        }
    }

    pub fn parse<'a>(&self, input: &'a str) -> MatchResult<&'a str> {
        self.regex
            .captures(input)
            .and_then(|caps| caps.name("number"))
            .map(|m| m.as_str())
            .ok_or(PatternMismatch { pattern: Self::NAME })
    }
}

impl Default for ResolutionNumberMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Both halves of a government line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GovernmentMatch<'a> {
    pub gov_number: &'a str,
    pub pm_name: &'a str,
}

/// Government lines such as `ממשלה/הממשלה ה - 34 בנימין נתניהו;`.
#[derive(Debug, Clone)]
pub struct GovernmentMatcher {
    regex: Regex,
}

impl GovernmentMatcher {
    pub const NAME: &'static str = "gov";
    const PATTERN: &'static str =
        r"^.+\s??-\s?(?P<gov_number>.+?)\s+?(?P<pm_name>.+?);?\n?$";

    pub fn new() -> Self {
        Self {
            regex: Regex::new(Self::PATTERN).expect("government pattern compiles"),
        }
    }

    pub fn parse<'a>(&self, input: &'a str) -> MatchResult<GovernmentMatch<'a>> {
        let caps = self
            .regex
            .captures(input)
            .ok_or(PatternMismatch { pattern: Self::NAME })?;
        match (caps.name("gov_number"), caps.name("pm_name")) {
            (Some(gov_number), Some(pm_name)) => Ok(GovernmentMatch {
                gov_number: gov_number.as_str(),
                pm_name: pm_name.as_str(),
            }),
            _ => Err(PatternMismatch { pattern: Self::NAME }),
        }
    }
}

impl Default for GovernmentMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Every matcher the sanitizer needs, compiled once per process.
#[derive(Debug, Clone, Default)]
pub struct Patterns {
    pub date: DateMatcher,
    pub resolution_number: ResolutionNumberMatcher,
    pub government: GovernmentMatcher,
}

impl Patterns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}
