use cadence::{Clock, Error, Renderer, Timer, WatchFaceEngine};
use timeline::{
    Complication, ComplicationData, ComplicationText, ContentUpdate, SlotId, TimelineItem,
    Timestamp,
};

pub const COUNTDOWN_SLOT: SlotId = SlotId(1);
pub const AGENDA_SLOT: SlotId = SlotId(2);

fn long_text(text: &str) -> Complication {
    Complication::new(ComplicationData::LongText {
        text: ComplicationText::plain(text),
        title: None,
    })
}

/// Demo content: a countdown slot and an agenda slot whose timeline nests a
/// short override inside a longer entry.
pub fn batch(now: Timestamp, countdown_secs: u32) -> Vec<(SlotId, ContentUpdate<Complication>)> {
    let secs = |s: i64| now.saturating_add_millis(s * 1000);
    let target = secs(i64::from(countdown_secs));
    let countdown = Complication::new(ComplicationData::ShortText {
        text: ComplicationText::countdown(target, "T-"),
        title: Some(ComplicationText::plain("Launch")),
    })
    .do_not_persist();

    vec![
        (
            COUNTDOWN_SLOT,
            ContentUpdate::Full {
                base: Complication::no_data(),
                timeline: vec![
                    TimelineItem::new(countdown, now, Some(target)),
                    TimelineItem::new(long_text("Liftoff"), target, None),
                ],
            },
        ),
        (
            AGENDA_SLOT,
            ContentUpdate::Full {
                base: long_text("No meetings"),
                timeline: vec![
                    TimelineItem::new(long_text("Standup"), secs(5), Some(secs(15))),
                    TimelineItem::new(long_text("Standup: your turn"), secs(8), Some(secs(10))),
                ],
            },
        ),
    ]
}

pub fn install<C, T, R>(
    engine: &mut WatchFaceEngine<Complication, C, T, R>,
    now: Timestamp,
    countdown_secs: u32,
) -> Result<(), Error>
where
    C: Clock,
    T: Timer,
    R: Renderer<Complication>,
{
    engine.configure_slot(COUNTDOWN_SLOT, Complication::no_data())?;
    engine.configure_slot(AGENDA_SLOT, Complication::no_data())?;
    engine.apply_content(batch(now, countdown_secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use timeline::SlotRegistry;

    #[test]
    fn agenda_override_hands_back_to_outer_entry() {
        let now = Timestamp::from_millis(0);
        let mut slots = SlotRegistry::new();
        slots.configure(COUNTDOWN_SLOT, Complication::no_data());
        slots.configure(AGENDA_SLOT, Complication::no_data());
        slots.apply_batch(batch(now, 30)).unwrap();

        let agenda = slots.get(AGENDA_SLOT).unwrap();
        let text = |t: i64| {
            let at = Timestamp::from_millis(t);
            agenda.active(at).data.text_at(at)
        };
        assert_eq!(text(0).as_deref(), Some("No meetings"));
        assert_eq!(text(9_000).as_deref(), Some("Standup: your turn"));
        assert_eq!(text(12_000).as_deref(), Some("Standup"));
        assert_eq!(text(15_000).as_deref(), Some("No meetings"));

        let countdown = slots.get(COUNTDOWN_SLOT).unwrap();
        let at = Timestamp::from_millis(29_500);
        assert_eq!(countdown.active(at).data.text_at(at).as_deref(), Some("T-00:01"));
        assert_eq!(slots.next_change_instant(at), Some(Timestamp::from_millis(30_000)));
    }
}
