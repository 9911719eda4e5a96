//! Patron profile command
//!
//! Prints subject preferences per department and per user type, and ranks
//! departments by the breadth of their reading.

use clap::Args;
use shelfpath_analysis::profile::{GroupedSubjects, PatronProfiles};

use super::input::InputArg;

const DIVERSE_DEPARTMENTS: usize = 5;

#[derive(Debug, Clone, Args)]
pub(crate) struct PatronsArg {
    #[clap(flatten)]
    pub input: InputArg,
}

pub(crate) fn run(arg: &PatronsArg) -> anyhow::Result<()> {
    let dataset = arg.input.load_dataset()?;
    let profiles = PatronProfiles::from_dataset(&dataset);
    tracing::info!(
        departments = profiles.departments().len(),
        user_types = profiles.user_types().len(),
        "built patron profiles"
    );

    println!("Patron Profiles");
    println!("===============\n");

    println!("Subject Preferences by Department");
    print_group_table("Department", profiles.departments());
    println!();

    println!("Subject Preferences by User Type");
    print_group_table("User Type", profiles.user_types());
    println!();

    println!("Most Diverse Departments (distinct subjects)");
    let diverse = profiles.departments().most_diverse(DIVERSE_DEPARTMENTS);
    if diverse.is_empty() {
        println!("  (none)");
    }
    for (rank, ranked) in (1..).zip(&diverse) {
        println!("  {rank:>2}. {:<20} {:>4}", ranked.key, ranked.count);
    }

    Ok(())
}

fn print_group_table(label_col: &str, groups: &GroupedSubjects) {
    println!(
        "  {:<20} {:>10} {:>9} {:<32}",
        label_col, "Checkouts", "Subjects", "Favorite Subject"
    );
    println!("  {}", "-".repeat(20 + 10 + 9 + 32 + 3));
    if groups.is_empty() {
        println!("  (no checkouts)");
    }
    // busiest first; asking for every group keeps the full table
    for ranked in groups.busiest(groups.len()) {
        let Some(counts) = groups.get(&ranked.key) else {
            continue;
        };
        let favorite = groups
            .favorite_subject(&ranked.key)
            .map_or("-", |subject| subject.as_str());
        println!(
            "  {:<20} {:>10} {:>9} {:<32}",
            ranked.key,
            ranked.count,
            counts.len(),
            favorite
        );
    }
}
