//! Synthetic seed batch that every new session starts with.
//!
//! Columns are drawn one after another from a single seeded generator:
//! every issue type first, then every description, then statuses, then
//! priorities. Submission dates come from a separate stream so switching
//! [`DateSource`] never disturbs the categorical columns.

use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{DateSource, SeedConfig};
use crate::model::{IssueType, Priority, Status, Ticket, TicketId};

/// Canned issue descriptions the seed batch draws from.
pub const ISSUE_DESCRIPTIONS: [&str; 9] = [
    "Issue with login",
    "Feature request for new functionality",
    "Requirement for performance improvement",
    "Bug in the user interface",
    "Request for additional documentation",
    "Requirement for security enhancement",
    "Bug in data processing",
    "Request for a new report",
    "Requirement for system integration",
];

/// Mixed into the batch seed to derive the date stream.
const DATE_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

/// Generate the seed batch described by `config`.
///
/// Index 0 carries id `first_id`; each following row counts down by one.
/// No seed ticket has an attachment. `config` must already have passed
/// [`SeedConfig::validate`].
#[must_use]
pub(crate) fn generate(config: &SeedConfig) -> Vec<Ticket> {
    let count = usize::try_from(config.count).unwrap_or(usize::MAX);
    let mut rng = StdRng::seed_from_u64(config.seed);

    let issue_types = draw(&mut rng, &IssueType::ALL, count);
    let issues = draw(&mut rng, &ISSUE_DESCRIPTIONS, count);
    let statuses = draw(&mut rng, &Status::ALL, count);
    let priorities = draw(&mut rng, &Priority::ALL, count);

    let dates = match config.dates {
        DateSource::Seeded => {
            let mut date_rng = StdRng::seed_from_u64(config.seed ^ DATE_STREAM);
            draw_dates(&mut date_rng, config.start_date, config.span_days, count)
        }
        DateSource::Entropy => draw_dates(
            &mut rand::thread_rng(),
            config.start_date,
            config.span_days,
            count,
        ),
    };

    let tickets: Vec<Ticket> = (0..u64::from(config.count))
        .zip(issue_types)
        .zip(issues)
        .zip(statuses)
        .zip(priorities)
        .zip(dates)
        .map(
            |(((((offset, issue_type), issue), status), priority), date_submitted)| Ticket {
                id: TicketId::from_number(config.first_id.saturating_sub(offset)),
                issue_type,
                issue: issue.to_string(),
                status,
                priority,
                date_submitted,
                attachment: None,
            },
        )
        .collect();

    tracing::debug!(
        seed = config.seed,
        count = tickets.len(),
        dates = ?config.dates,
        "generated seed batch"
    );
    tickets
}

/// Uniform draws with replacement.
fn draw<T: Copy, R: Rng>(rng: &mut R, options: &[T], count: usize) -> Vec<T> {
    (0..count)
        .map(|_| options[rng.gen_range(0..options.len())])
        .collect()
}

fn draw_dates<R: Rng>(
    rng: &mut R,
    start: NaiveDate,
    span_days: u32,
    count: usize,
) -> Vec<NaiveDate> {
    (0..count)
        .map(|_| {
            let offset = rng.gen_range(0..=u64::from(span_days));
            start.checked_add_days(Days::new(offset)).unwrap_or(start)
        })
        .collect()
}
