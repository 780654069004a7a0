//! Build the frame shown for one sample.
//!
//! The live monitor and the replay engine both call [`render`], so a
//! replayed record looks exactly like the tick that produced it, minus
//! whatever metrics replay does not derive.

use nicowatch_types::Sample;

use super::line::{Frame, Line, Span, Tone};
use crate::data::format::format_count;
use crate::data::{compare, DerivedMetrics, Milestone};

const BANNER_TIME: &str = "%Y-%m-%d %H:%M:%S";

/// Render one sample with its derived metrics.
///
/// `previous` is the sample the deltas were computed against.
pub fn render(current: &Sample, previous: Option<&Sample>, metrics: &DerivedMetrics) -> Frame {
    let mut frame = Frame::new();

    frame.push(Line::styled(
        format!(
            "--- nicowatch: {} @ {} ---",
            current.captured_at.format(BANNER_TIME),
            current.content_id()
        ),
        Tone::Banner,
    ));

    frame.push(heading("Metadata"));
    frame.push(Line::plain(format!("Title: {}", current.title())));
    frame.push(Line::plain(format!(
        "Owner: {} [ID: {}]",
        current.owner().nickname,
        current.owner().id
    )));

    frame.push(heading("Counters"));
    let counts = current.counts();
    let prev = previous.map(|p| *p.counts());
    frame.push(&compare("Views   ", counts.views, prev.map(|c| c.views)));
    frame.push(&compare("Comments", counts.comments, prev.map(|c| c.comments)));
    frame.push(&compare("Mylists ", counts.mylists, prev.map(|c| c.mylists)));
    frame.push(&compare("Likes   ", counts.likes, prev.map(|c| c.likes)));

    frame.push(heading("Analytics"));
    frame.push(&compare("Points  ", metrics.points, metrics.previous_points));
    if let Some(speed) = metrics.speed {
        frame.push(&compare("Speed   ", speed, metrics.previous_speed));
    }
    if let Some(average) = metrics.average_speed {
        frame.push(&compare("Average ", average, metrics.previous_average_speed));
    }
    if let Some(milestone) = &metrics.milestone {
        frame.push(milestone_line(milestone));
    }

    frame.push(heading("Series"));
    match current.series() {
        Some(series) => {
            frame.push(Line::plain(format!("Title   : {}", series.title)));
            frame.push(link_line(
                "Previous",
                series.previous_item_id.as_deref(),
                "No previous video.",
            ));
            frame.push(link_line("Next    ", series.next_item_id.as_deref(), "No next video."));
        }
        None => frame.push(Line::styled("No series.", Tone::Missing)),
    }

    frame.push(heading("Tags"));
    for tag in current.tags() {
        let line = Line::plain(format!("Tag: {}", tag.name));
        frame.push(if tag.locked {
            line.with(Span::styled(" [Locked]", Tone::Locked))
        } else {
            line
        });
    }

    frame
}

fn heading(title: &str) -> Line {
    Line::styled(format!("== {} ==", title), Tone::Heading)
}

fn link_line(label: &str, id: Option<&str>, missing: &str) -> Line {
    match id {
        Some(id) => Line::plain(format!("{}: {}", label, id)),
        None => Line::plain(format!("{}: ", label)).with(Span::styled(missing, Tone::Missing)),
    }
}

fn milestone_line(milestone: &Milestone) -> Line {
    if milestone.imminent {
        Line::plain("Milestone: ").with(Span::styled(
            format!(
                "{} views in {}!",
                milestone.label(),
                format_count(milestone.remaining as i128)
            ),
            Tone::Imminent,
        ))
    } else {
        Line::plain(format!(
            "Milestone: {} ({} to {})",
            milestone.tier_label(),
            format_count(milestone.remaining as i128),
            milestone.label()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{analyze, SpeedHistory};
    use chrono::{DateTime, Local, TimeZone};
    use nicowatch_types::Counts;
    use std::time::Duration;

    fn noon() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
            .single()
            .unwrap()
    }

    fn sample(views: u64, likes: u64) -> Sample {
        Sample::builder("sm9")
            .title("Example")
            .owner("nick", "42")
            .counts(Counts::new(views, 2, 1, likes))
            .tag("music", true)
            .tag("cover", false)
            .captured_at(noon())
            .build()
    }

    fn text(frame: &Frame) -> Vec<String> {
        frame.lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn first_sample_frame() {
        let s = sample(10, 3);
        let m = analyze(
            s.counts(),
            None,
            &SpeedHistory::new(),
            Some(Duration::from_secs(10)),
        );
        let lines = text(&render(&s, None, &m));

        assert_eq!(lines[0], "--- nicowatch: 2024-03-01 12:00:00 @ sm9 ---");
        assert!(lines.contains(&"Title: Example".to_string()));
        assert!(lines.contains(&"Owner: nick [ID: 42]".to_string()));
        assert!(lines.contains(&"Views   : 10".to_string()));
        assert!(lines.contains(&"Points  : 228".to_string()));
        assert!(lines.contains(&"Milestone: below 100K (99,990 to 100K)".to_string()));
        assert!(lines.contains(&"No series.".to_string()));
        assert!(lines.contains(&"Tag: music [Locked]".to_string()));
        assert!(lines.contains(&"Tag: cover".to_string()));
        assert!(!lines.iter().any(|l| l.starts_with("Speed")));
    }

    #[test]
    fn second_sample_shows_deltas_and_speed() {
        let first = sample(10, 3);
        let second = sample(110, 5);
        let m = analyze(
            second.counts(),
            Some(first.counts()),
            &SpeedHistory::new(),
            Some(Duration::from_secs(10)),
        );
        let frame = render(&second, Some(&first), &m);
        let lines = text(&frame);

        assert!(lines.contains(&"Views   : 110 (+100)".to_string()));
        assert!(lines.contains(&"Likes   : 5 (+2)".to_string()));
        assert!(lines.contains(&"Comments: 2".to_string()));
        assert!(lines.contains(&"Points  : 588 (+360)".to_string()));
        assert!(lines.contains(&"Speed   : 13,000.00".to_string()));
        assert!(lines.contains(&"Average : 13,000.00".to_string()));
    }

    #[test]
    fn imminent_milestone_is_highlighted() {
        let s = sample(95_000, 0);
        let m = analyze(s.counts(), None, &SpeedHistory::new(), None);
        let frame = render(&s, None, &m);

        let line = frame
            .lines
            .iter()
            .find(|l| l.to_string().starts_with("Milestone"))
            .unwrap();
        assert_eq!(line.to_string(), "Milestone: 100K views in 5,000!");
        assert_eq!(line.spans[1].tone, Tone::Imminent);
    }

    #[test]
    fn series_links() {
        let s = Sample::builder("sm9")
            .series("Saga", Some("sm8"), None)
            .captured_at(noon())
            .build();
        let m = analyze(s.counts(), None, &SpeedHistory::new(), None);
        let lines = text(&render(&s, None, &m));

        assert!(lines.contains(&"Title   : Saga".to_string()));
        assert!(lines.contains(&"Previous: sm8".to_string()));
        assert!(lines.contains(&"Next    : No next video.".to_string()));
    }
}
