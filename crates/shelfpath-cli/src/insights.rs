//! Plain-text insight summary
//!
//! Condenses the analyses into a short report for library staff planning
//! reading programs and events.

use std::fmt;

use chrono::{NaiveDate, Weekday};
use shelfpath_analysis::{
    activity::ActivityGrid, journey::ReadingJourneyReport, popularity::SubjectPopularity,
    profile::PatronProfiles,
};

const POPULAR_SUBJECTS: usize = 5;
const LISTED_PATHS: usize = 5;
const LISTED_DEPARTMENTS: usize = 5;
const LISTED_PAIRS: usize = 5;
const RECOMMENDATIONS: usize = 3;

/// Analyses to summarize, borrowed for rendering.
#[derive(Debug, Clone, Copy)]
pub struct InsightSummary<'a> {
    pub report: &'a ReadingJourneyReport,
    pub popularity: &'a SubjectPopularity,
    pub profiles: &'a PatronProfiles,
    pub activity: &'a ActivityGrid,
    /// Date printed in the footer
    pub generated_on: NaiveDate,
}

impl InsightSummary<'_> {
    fn write_popular_subjects(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        section(f, "1. MOST POPULAR SUBJECTS")?;
        for ranked in self.popularity.top(POPULAR_SUBJECTS) {
            writeln!(f, "- {}: {} checkouts", ranked.key, ranked.count)?;
        }
        Ok(())
    }

    fn write_transitions(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        section(f, "2. TOP READING TRANSITIONS")?;
        let transitions = &self.report.transitions;
        for from in transitions.subjects() {
            if let Some((to, count)) = transitions.top_destination(from.as_str()) {
                writeln!(f, "- {from} → {to}: {count} transitions")?;
            }
        }
        Ok(())
    }

    fn write_paths(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        section(f, "3. COMMON READING PATHS")?;
        for ranked in self.report.top_paths.iter().take(LISTED_PATHS) {
            writeln!(f, "- {}: {} occurrences", ranked.key, ranked.count)?;
        }
        Ok(())
    }

    fn write_departments(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        section(f, "4. DEPARTMENT READING PREFERENCES")?;
        let departments = self.profiles.departments();
        for ranked in departments.busiest(LISTED_DEPARTMENTS) {
            if let Some(subject) = departments.favorite_subject(&ranked.key) {
                writeln!(f, "- {}: Prefers {subject}", ranked.key)?;
            }
        }
        Ok(())
    }

    fn write_pairs(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        section(f, "5. POTENTIAL BOOK CLUB TOPICS")?;
        for ranked in self.report.top_pairs.iter().take(LISTED_PAIRS) {
            writeln!(f, "- {}: {} co-occurrences", ranked.key, ranked.count)?;
        }
        Ok(())
    }

    fn write_event_times(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        section(f, "6. OPTIMAL EVENT TIMES")?;
        let (Some((day, _)), Some((hour, _)), Some((peak_day, peak_hour, _))) = (
            self.activity.busiest_weekday(),
            self.activity.busiest_hour(),
            self.activity.peak(),
        ) else {
            return writeln!(f, "- No timed activity recorded");
        };
        writeln!(f, "- Busiest day: {}", weekday_name(day))?;
        writeln!(f, "- Busiest hour: {hour}:00")?;
        writeln!(
            f,
            "- Peak activity time: {} at {peak_hour}:00",
            weekday_name(peak_day)
        )
    }

    fn write_recommendations(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        section(f, "7. COMMUNITY ENGAGEMENT RECOMMENDATIONS")?;
        writeln!(f, "a) Reading Path Programs:")?;
        for ranked in self.report.top_paths.iter().take(RECOMMENDATIONS) {
            writeln!(f, "   - '{}' themed reading challenge", ranked.key)?;
        }

        writeln!(f)?;
        writeln!(f, "b) Book Clubs:")?;
        for ranked in self.report.top_pairs.iter().take(RECOMMENDATIONS) {
            writeln!(f, "   - '{}' discussion group", ranked.key)?;
        }

        writeln!(f)?;
        writeln!(f, "c) Department-Specific Initiatives:")?;
        let departments = self.profiles.departments();
        for ranked in departments.busiest(RECOMMENDATIONS) {
            if let Some(subject) = departments.favorite_subject(&ranked.key) {
                writeln!(f, "   - {}: {subject} workshop or seminar", ranked.key)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for InsightSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "LIBRARY READING JOURNEYS & COMMUNITY ENGAGEMENT INSIGHTS")?;
        writeln!(f, "{}", "=".repeat(60))?;
        writeln!(f)?;

        self.write_popular_subjects(f)?;
        writeln!(f)?;
        self.write_transitions(f)?;
        writeln!(f)?;
        self.write_paths(f)?;
        writeln!(f)?;
        self.write_departments(f)?;
        writeln!(f)?;
        self.write_pairs(f)?;
        writeln!(f)?;
        self.write_event_times(f)?;
        writeln!(f)?;
        self.write_recommendations(f)?;

        writeln!(f)?;
        writeln!(f)?;
        writeln!(
            f,
            "Analysis completed on {}",
            self.generated_on.format("%B %-d, %Y")
        )
    }
}

fn section(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "{title}")?;
    writeln!(f, "{}", "-".repeat(30))
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
