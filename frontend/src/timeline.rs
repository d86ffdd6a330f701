//! Ordering and labelling of historical messages.
//!
//! Timestamps come from the backend as text. They are parsed leniently,
//! sorted, and rendered in the viewer's time zone with a date separator
//! in front of each new calendar day.

use std::fmt::Display;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::models::{Conversation, Message};

/// Formats accepted for timestamps that carry no offset; they are read as UTC.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// One row of a rendered conversation history.
#[derive(Clone, Debug, PartialEq)]
pub enum TimelineEntry {
    DateSeparator(String),
    Message { message: Message, time_label: String },
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn message_time(message: &Message) -> Option<DateTime<Utc>> {
    message.timestamp.as_deref().and_then(parse_timestamp)
}

/// Oldest first. Messages without a usable timestamp keep their relative
/// order and go after the dated ones.
pub fn sort_messages(messages: &[Message]) -> Vec<Message> {
    let mut sorted = messages.to_vec();
    sorted.sort_by_key(|m| {
        let ts = message_time(m);
        (ts.is_none(), ts)
    });
    sorted
}

pub fn build_timeline<Tz>(messages: &[Message], tz: &Tz) -> Vec<TimelineEntry>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut entries = Vec::with_capacity(messages.len() + 1);
    let mut last_date: Option<NaiveDate> = None;

    for message in sort_messages(messages) {
        let time_label = match message_time(&message).map(|ts| ts.with_timezone(tz)) {
            Some(local) => {
                let date = local.date_naive();
                if last_date != Some(date) {
                    entries.push(TimelineEntry::DateSeparator(format_date(&local)));
                    last_date = Some(date);
                }
                format_time(&local)
            }
            None => String::new(),
        };
        entries.push(TimelineEntry::Message { message, time_label });
    }

    entries
}

/// When a conversation took place: its start time, or failing that the
/// earliest message.
pub fn conversation_date(conversation: &Conversation) -> Option<DateTime<Utc>> {
    conversation
        .started_at
        .as_deref()
        .and_then(parse_timestamp)
        .or_else(|| conversation.messages.iter().filter_map(message_time).min())
}

/// `Mon, Oct 19, 2026`
pub fn format_date<Tz: TimeZone>(ts: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    ts.format("%a, %b %-d, %Y").to_string()
}

/// `3:07 PM`
pub fn format_time<Tz: TimeZone>(ts: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    ts.format("%-I:%M %p").to_string()
}

/// `Oct 19, 2026`
pub fn format_card_date<Tz: TimeZone>(ts: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    ts.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;
    use crate::models::Sender;

    fn msg(id: &str, timestamp: Option<&str>) -> Message {
        Message {
            id: id.to_string(),
            content: format!("message {id}"),
            sender: Sender::User,
            timestamp: timestamp.map(str::to_string),
        }
    }

    fn labels(entries: &[TimelineEntry]) -> Vec<String> {
        entries
            .iter()
            .map(|e| match e {
                TimelineEntry::DateSeparator(date) => format!("[{date}]"),
                TimelineEntry::Message { message, time_label } => {
                    format!("{} {time_label}", message.id)
                }
            })
            .collect()
    }

    #[test]
    fn parses_offset_and_naive_timestamps() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2024-03-01T10:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-01T12:30:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-01T10:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-01 10:30:00"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-03-01T10:30:00.250000").map(|t| t.timestamp_millis()),
            Some(expected.timestamp_millis() + 250)
        );
    }

    #[test]
    fn rejects_garbage_timestamps() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("10:30"), None);
    }

    #[test]
    fn sorts_oldest_first_with_undated_last() {
        let messages = vec![
            msg("c", Some("2024-03-02T09:00:00Z")),
            msg("x", None),
            msg("a", Some("2024-03-01T09:00:00Z")),
            msg("y", Some("not a date")),
            msg("b", Some("2024-03-01T18:00:00Z")),
        ];
        let ids: Vec<String> = sort_messages(&messages).into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["a", "b", "c", "x", "y"]);
    }

    #[test]
    fn inserts_separator_per_calendar_day() {
        let messages = vec![
            msg("3", Some("2024-03-02T08:05:00Z")),
            msg("1", Some("2024-03-01T09:00:00Z")),
            msg("2", Some("2024-03-01T21:15:00Z")),
        ];
        let entries = build_timeline(&messages, &Utc);
        assert_eq!(
            labels(&entries),
            vec![
                "[Fri, Mar 1, 2024]",
                "1 9:00 AM",
                "2 9:15 PM",
                "[Sat, Mar 2, 2024]",
                "3 8:05 AM",
            ]
        );
    }

    #[test]
    fn day_boundaries_follow_the_viewer_zone() {
        let messages = vec![
            msg("1", Some("2024-03-01T20:00:00Z")),
            msg("2", Some("2024-03-01T23:30:00Z")),
        ];
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let entries = build_timeline(&messages, &tokyo);
        assert_eq!(
            labels(&entries),
            vec!["[Sat, Mar 2, 2024]", "1 5:00 AM", "2 8:30 AM"]
        );
    }

    #[test]
    fn undated_messages_get_no_separator() {
        let messages = vec![msg("1", Some("2024-03-01T09:00:00Z")), msg("2", None)];
        let entries = build_timeline(&messages, &Utc);
        assert_eq!(labels(&entries), vec!["[Fri, Mar 1, 2024]", "1 9:00 AM", "2 "]);
    }

    #[test]
    fn empty_history_is_empty_timeline() {
        assert!(build_timeline(&[], &Utc).is_empty());
    }

    #[test]
    fn conversation_date_prefers_start_time() {
        let mut conv = Conversation {
            id: "1".into(),
            title: None,
            summary: None,
            started_at: Some("2024-01-05T12:00:00Z".into()),
            messages: vec![
                msg("2", Some("2024-01-07T12:00:00Z")),
                msg("1", Some("2024-01-06T12:00:00Z")),
            ],
        };
        assert_eq!(format_card_date(&conversation_date(&conv).unwrap()), "Jan 5, 2024");

        conv.started_at = None;
        assert_eq!(format_card_date(&conversation_date(&conv).unwrap()), "Jan 6, 2024");

        conv.messages.clear();
        assert_eq!(conversation_date(&conv), None);
    }
}
