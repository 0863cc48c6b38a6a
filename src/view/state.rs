//! Observable view state and its transition table.
//!
//! [`ViewState`] is the single source of truth the presentation renders from. It only
//! changes through [`ViewState::apply`], which returns the side effect (if any) the
//! caller must perform. Nothing here touches the network, the clipboard or a clock;
//! time arrives as an explicit `now` on the actions that need it.

use crate::model::{Draft, GenerationOutcome, GenerationRequest, Tone};
use std::time::{Duration, Instant};

/// How long a clipboard notice stays up unless dismissed.
pub const NOTICE_DISPLAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Copied,
    /// Clipboard write failed. Kept apart from generation failures.
    CopyFailed,
}

impl NoticeKind {
    pub fn message(self) -> &'static str {
        match self {
            NoticeKind::Copied => "Copied to clipboard!",
            NoticeKind::CopyFailed => "Could not copy to clipboard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub raised_at: Instant,
}

/// Edits applied to the draft text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftEdit {
    Insert(char),
    Backspace,
    Paste(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    EditContent(DraftEdit),
    SetTone(Tone),
    CycleTone { forward: bool },
    Submit,
    Settled {
        generation: u64,
        outcome: GenerationOutcome,
    },
    Clear,
    Copy { now: Instant },
    CopyFailed { now: Instant },
    DismissNotice,
    Tick { now: Instant },
}

/// Work the owner of the state must carry out after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Dispatch(GenerationRequest),
    CopyToClipboard(String),
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    draft: Draft,
    status: RequestStatus,
    reply: Option<String>,
    error_message: Option<String>,
    notice: Option<Notice>,
    /// Tag of the newest request (or clear). Outcomes carrying any other tag are stale.
    generation: u64,
}

impl ViewState {
    pub fn new(draft: Draft) -> Self {
        Self {
            draft,
            ..Default::default()
        }
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn reply(&self) -> Option<&str> {
        self.reply.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    /// True while the "copied" notice is up.
    pub fn clipboard_notice(&self) -> bool {
        matches!(
            self.notice,
            Some(Notice {
                kind: NoticeKind::Copied,
                ..
            })
        )
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn can_submit(&self) -> bool {
        self.draft.is_submittable() && self.status != RequestStatus::Pending
    }

    pub fn can_copy(&self) -> bool {
        self.status == RequestStatus::Succeeded
    }

    pub fn apply(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::EditContent(edit) => {
                self.edit_content(edit);
                None
            }
            Action::SetTone(tone) => {
                self.draft.tone = tone;
                None
            }
            Action::CycleTone { forward } => {
                let tone = self.draft.tone;
                self.draft.tone = if forward { tone.next() } else { tone.prev() };
                None
            }
            Action::Submit => self.submit().map(Effect::Dispatch),
            Action::Settled {
                generation,
                outcome,
            } => {
                self.settle(generation, outcome);
                None
            }
            Action::Clear => {
                self.clear();
                None
            }
            Action::Copy { now } => self.copy(now),
            Action::CopyFailed { now } => {
                self.notice = Some(Notice {
                    kind: NoticeKind::CopyFailed,
                    raised_at: now,
                });
                None
            }
            Action::DismissNotice => {
                self.notice = None;
                None
            }
            Action::Tick { now } => {
                self.expire_notice(now);
                None
            }
        }
    }

    fn edit_content(&mut self, edit: DraftEdit) {
        let content = &mut self.draft.email_content;
        match edit {
            DraftEdit::Insert(c) => content.push(c),
            DraftEdit::Backspace => {
                content.pop();
            }
            DraftEdit::Paste(text) => content.push_str(&text),
        }
    }

    fn submit(&mut self) -> Option<GenerationRequest> {
        if self.status == RequestStatus::Pending {
            tracing::debug!(generation = self.generation, "submit ignored: request pending");
            return None;
        }
        let request = GenerationRequest::from_draft(&self.draft, self.generation + 1)?;
        self.generation = request.generation();
        self.reply = None;
        self.error_message = None;
        self.status = RequestStatus::Pending;
        Some(request)
    }

    fn settle(&mut self, generation: u64, outcome: GenerationOutcome) {
        if generation != self.generation || self.status != RequestStatus::Pending {
            tracing::debug!(
                generation,
                current = self.generation,
                "discarding stale generation outcome"
            );
            return;
        }
        match outcome {
            GenerationOutcome::Success { reply } => {
                self.reply = Some(reply);
                self.error_message = None;
                self.status = RequestStatus::Succeeded;
            }
            GenerationOutcome::Failure { message } => {
                self.reply = None;
                self.error_message = Some(message);
                self.status = RequestStatus::Failed;
            }
        }
    }

    fn clear(&mut self) {
        // Bump the tag so an outcome still in flight lands as stale.
        self.generation += 1;
        self.draft = Draft::default();
        self.reply = None;
        self.error_message = None;
        self.notice = None;
        self.status = RequestStatus::Idle;
    }

    fn copy(&mut self, now: Instant) -> Option<Effect> {
        if self.status != RequestStatus::Succeeded {
            return None;
        }
        let reply = self.reply.clone()?;
        self.notice = Some(Notice {
            kind: NoticeKind::Copied,
            raised_at: now,
        });
        Some(Effect::CopyToClipboard(reply))
    }

    fn expire_notice(&mut self, now: Instant) {
        if let Some(n) = self.notice {
            if now.saturating_duration_since(n.raised_at) >= NOTICE_DISPLAY {
                self.notice = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GENERATION_FAILED_MESSAGE;

    fn draft(text: &str, tone: Tone) -> ViewState {
        ViewState::new(Draft::new(text, tone))
    }

    fn success(reply: &str) -> GenerationOutcome {
        GenerationOutcome::Success {
            reply: reply.into(),
        }
    }

    fn failure() -> GenerationOutcome {
        GenerationOutcome::Failure {
            message: GENERATION_FAILED_MESSAGE.into(),
        }
    }

    fn submit(state: &mut ViewState) -> GenerationRequest {
        match state.apply(Action::Submit) {
            Some(Effect::Dispatch(req)) => req,
            other => panic!("expected dispatch, got {other:?}"),
        }
    }

    fn assert_exclusive(state: &ViewState) {
        match state.status() {
            RequestStatus::Succeeded => {
                assert!(state.reply().is_some());
                assert!(state.error_message().is_none());
            }
            RequestStatus::Failed => {
                assert!(state.reply().is_none());
                assert!(state.error_message().is_some());
            }
            RequestStatus::Idle | RequestStatus::Pending => {
                assert!(state.reply().is_none());
                assert!(state.error_message().is_none());
            }
        }
    }

    #[test]
    fn scenario_a_success_stores_reply() {
        let mut state = draft("Hi, can we reschedule?", Tone::Professional);
        let req = submit(&mut state);
        assert_eq!(req.email_content(), "Hi, can we reschedule?");
        assert_eq!(req.tone(), Tone::Professional);
        assert_eq!(state.status(), RequestStatus::Pending);

        state.apply(Action::Settled {
            generation: req.generation(),
            outcome: success("Certainly, let's find a new time."),
        });
        assert_eq!(state.status(), RequestStatus::Succeeded);
        assert_eq!(state.reply(), Some("Certainly, let's find a new time."));
        assert_eq!(state.error_message(), None);
    }

    #[test]
    fn scenario_b_failure_stores_generic_message() {
        let mut state = draft("Hi, can we reschedule?", Tone::Professional);
        let req = submit(&mut state);
        state.apply(Action::Settled {
            generation: req.generation(),
            outcome: failure(),
        });
        assert_eq!(state.status(), RequestStatus::Failed);
        assert_eq!(state.error_message(), Some(GENERATION_FAILED_MESSAGE));
        assert_eq!(state.reply(), None);
    }

    #[test]
    fn scenario_c_empty_content_is_rejected() {
        let mut state = draft("", Tone::Casual);
        assert_eq!(state.apply(Action::Submit), None);
        assert_eq!(state.status(), RequestStatus::Idle);
        assert_eq!(state.generation(), 0);
    }

    #[test]
    fn gating_holds_from_every_settled_state() {
        for outcome in [success("ok"), failure()] {
            let mut state = draft("x", Tone::Unspecified);
            let req = submit(&mut state);
            state.apply(Action::Settled {
                generation: req.generation(),
                outcome,
            });
            let before = state.status();
            state.apply(Action::EditContent(DraftEdit::Backspace));
            assert_eq!(state.apply(Action::Submit), None);
            assert_eq!(state.status(), before);
        }
    }

    #[test]
    fn repeated_submits_while_pending_dispatch_once() {
        let mut state = draft("hello", Tone::Friendly);
        let mut dispatched = 0;
        for _ in 0..10 {
            if let Some(Effect::Dispatch(_)) = state.apply(Action::Submit) {
                dispatched += 1;
            }
        }
        assert_eq!(dispatched, 1);
        assert_eq!(state.status(), RequestStatus::Pending);
        assert!(!state.can_submit());
    }

    #[test]
    fn resubmit_clears_previous_result() {
        let mut state = draft("hello", Tone::Friendly);
        let first = submit(&mut state);
        state.apply(Action::Settled {
            generation: first.generation(),
            outcome: success("one"),
        });

        let second = submit(&mut state);
        assert!(second.generation() > first.generation());
        assert_eq!(state.status(), RequestStatus::Pending);
        assert_eq!(state.reply(), None);

        state.apply(Action::Settled {
            generation: second.generation(),
            outcome: failure(),
        });
        let third = submit(&mut state);
        assert_eq!(state.error_message(), None);
        assert_exclusive(&state);
        state.apply(Action::Settled {
            generation: third.generation(),
            outcome: success("three"),
        });
        assert_eq!(state.reply(), Some("three"));
        assert_exclusive(&state);
    }

    #[test]
    fn clear_resets_everything_from_any_state() {
        let setups: Vec<Box<dyn Fn(&mut ViewState)>> = vec![
            Box::new(|_: &mut ViewState| {}),
            Box::new(|s: &mut ViewState| {
                submit(s);
            }),
            Box::new(|s: &mut ViewState| {
                let r = submit(s);
                s.apply(Action::Settled {
                    generation: r.generation(),
                    outcome: success("done"),
                });
            }),
            Box::new(|s: &mut ViewState| {
                let r = submit(s);
                s.apply(Action::Settled {
                    generation: r.generation(),
                    outcome: failure(),
                });
            }),
        ];

        for setup in setups {
            let mut state = draft("some email", Tone::Humorous);
            setup(&mut state);
            state.apply(Action::Clear);
            assert_eq!(state.draft(), &Draft::default());
            assert_eq!(state.status(), RequestStatus::Idle);
            assert_eq!(state.reply(), None);
            assert_eq!(state.error_message(), None);
        }
    }

    #[test]
    fn outcome_after_clear_is_discarded() {
        let mut state = draft("hello", Tone::Casual);
        let req = submit(&mut state);
        state.apply(Action::Clear);

        state.apply(Action::Settled {
            generation: req.generation(),
            outcome: success("late reply"),
        });
        assert_eq!(state.status(), RequestStatus::Idle);
        assert_eq!(state.reply(), None);
    }

    #[test]
    fn outcome_of_superseded_request_is_discarded() {
        let mut state = draft("hello", Tone::Casual);
        let old = submit(&mut state);
        state.apply(Action::Clear);
        state.apply(Action::EditContent(DraftEdit::Paste("again".into())));
        let new = submit(&mut state);

        state.apply(Action::Settled {
            generation: old.generation(),
            outcome: failure(),
        });
        assert_eq!(state.status(), RequestStatus::Pending);
        assert_eq!(state.error_message(), None);

        state.apply(Action::Settled {
            generation: new.generation(),
            outcome: success("fresh"),
        });
        assert_eq!(state.reply(), Some("fresh"));
    }

    #[test]
    fn duplicate_outcome_for_settled_request_is_ignored() {
        let mut state = draft("hello", Tone::Casual);
        let req = submit(&mut state);
        state.apply(Action::Settled {
            generation: req.generation(),
            outcome: success("first"),
        });
        state.apply(Action::Settled {
            generation: req.generation(),
            outcome: failure(),
        });
        assert_eq!(state.reply(), Some("first"));
        assert_exclusive(&state);
    }

    #[test]
    fn draft_edits_while_pending_do_not_touch_request() {
        let mut state = draft("original", Tone::Formal);
        let req = submit(&mut state);
        state.apply(Action::EditContent(DraftEdit::Insert('!')));
        state.apply(Action::SetTone(Tone::Casual));
        assert_eq!(state.status(), RequestStatus::Pending);
        assert_eq!(state.draft().email_content, "original!");
        assert_eq!(req.email_content(), "original");
        assert_eq!(req.tone(), Tone::Formal);

        state.apply(Action::Settled {
            generation: req.generation(),
            outcome: success("reply"),
        });
        assert_eq!(state.status(), RequestStatus::Succeeded);
    }

    #[test]
    fn cycling_tone_wraps_around() {
        let mut state = draft("x", Tone::Humorous);
        state.apply(Action::CycleTone { forward: true });
        assert_eq!(state.draft().tone, Tone::Unspecified);
        state.apply(Action::CycleTone { forward: false });
        assert_eq!(state.draft().tone, Tone::Humorous);
    }

    #[test]
    fn paste_appends_to_draft() {
        let mut state = draft("Re: ", Tone::Unspecified);
        state.apply(Action::EditContent(DraftEdit::Paste("Hi,\ncan we reschedule?".into())));
        assert_eq!(state.draft().email_content, "Re: Hi,\ncan we reschedule?");
    }

    #[test]
    fn backspace_edits_draft() {
        let mut state = draft("ab", Tone::Unspecified);
        state.apply(Action::EditContent(DraftEdit::Backspace));
        state.apply(Action::EditContent(DraftEdit::Backspace));
        state.apply(Action::EditContent(DraftEdit::Backspace));
        assert_eq!(state.draft().email_content, "");
        assert!(!state.can_submit());
    }

    #[test]
    fn scenario_d_copy_raises_notice_then_expires() {
        let mut state = draft("hello", Tone::Unspecified);
        let req = submit(&mut state);
        state.apply(Action::Settled {
            generation: req.generation(),
            outcome: success("Thanks!"),
        });

        let t0 = Instant::now();
        let effect = state.apply(Action::Copy { now: t0 });
        assert_eq!(effect, Some(Effect::CopyToClipboard("Thanks!".into())));
        assert!(state.clipboard_notice());

        state.apply(Action::Tick {
            now: t0 + Duration::from_millis(1999),
        });
        assert!(state.clipboard_notice());

        state.apply(Action::Tick {
            now: t0 + Duration::from_millis(2000),
        });
        assert!(!state.clipboard_notice());
        assert_eq!(state.status(), RequestStatus::Succeeded);
        assert_eq!(state.reply(), Some("Thanks!"));
    }

    #[test]
    fn notice_can_be_dismissed_early() {
        let mut state = draft("hello", Tone::Unspecified);
        let req = submit(&mut state);
        state.apply(Action::Settled {
            generation: req.generation(),
            outcome: success("Thanks!"),
        });
        state.apply(Action::Copy {
            now: Instant::now(),
        });
        state.apply(Action::DismissNotice);
        assert!(!state.clipboard_notice());
    }

    #[test]
    fn clear_takes_down_copied_notice() {
        let mut state = draft("hello", Tone::Unspecified);
        let req = submit(&mut state);
        state.apply(Action::Settled {
            generation: req.generation(),
            outcome: success("Thanks!"),
        });
        state.apply(Action::Copy {
            now: Instant::now(),
        });
        assert!(state.clipboard_notice());

        state.apply(Action::Clear);
        assert_eq!(state.notice(), None);
        assert_eq!(state.reply(), None);
    }

    #[test]
    fn copy_is_unavailable_without_reply() {
        let mut state = draft("hello", Tone::Unspecified);
        assert_eq!(
            state.apply(Action::Copy {
                now: Instant::now()
            }),
            None
        );
        let req = submit(&mut state);
        assert_eq!(
            state.apply(Action::Copy {
                now: Instant::now()
            }),
            None
        );
        state.apply(Action::Settled {
            generation: req.generation(),
            outcome: failure(),
        });
        assert_eq!(
            state.apply(Action::Copy {
                now: Instant::now()
            }),
            None
        );
        assert!(!state.clipboard_notice());
    }

    #[test]
    fn copy_failure_is_not_a_generation_failure() {
        let mut state = draft("hello", Tone::Unspecified);
        let req = submit(&mut state);
        state.apply(Action::Settled {
            generation: req.generation(),
            outcome: success("Thanks!"),
        });
        let now = Instant::now();
        state.apply(Action::CopyFailed { now });

        assert_eq!(state.notice().map(|n| n.kind), Some(NoticeKind::CopyFailed));
        assert!(!state.clipboard_notice());
        assert_eq!(state.status(), RequestStatus::Succeeded);
        assert_eq!(state.error_message(), None);

        state.apply(Action::Tick {
            now: now + NOTICE_DISPLAY,
        });
        assert_eq!(state.notice(), None);
    }
}
