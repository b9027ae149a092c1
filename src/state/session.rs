/// Generation session state machine
///
/// Owns the gallery, the current selection and the single generation
/// slot. Pure state: no widgets, no network, no async. The application
/// loop feeds it user intent and completion events and re-renders from
/// the result, so every transition here is unit-testable on its own.

use super::data::{GeneratedImage, GenerationSettings, ImagePayload};

/// The one logical slot tracking a prompt-to-images request lifecycle.
/// At most one request is in flight per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// No request in flight; submission is allowed
    Idle,
    /// A request is running; further submissions are rejected
    Submitting,
}

/// An accepted submission: the trimmed prompt and the settings snapshot
/// the request must carry. Handed back to the caller so exactly one
/// external call is issued per accepted submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub prompt: String,
    pub settings: GenerationSettings,
}

/// Session-wide generation state
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Generated images, newest first
    gallery: Vec<GeneratedImage>,
    /// Id of the currently selected image, if any
    selected: Option<String>,
    /// The single generation slot
    slot: SlotState,
    /// Live settings; snapshotted into each accepted submission
    pub settings: GenerationSettings,
}

impl Default for SlotState {
    fn default() -> Self {
        SlotState::Idle
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// The gallery, newest first
    pub fn gallery(&self) -> &[GeneratedImage] {
        &self.gallery
    }

    /// The currently selected image, if the selection id is still present
    pub fn selected_image(&self) -> Option<&GeneratedImage> {
        let id = self.selected.as_deref()?;
        self.gallery.iter().find(|img| img.id == id)
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// True while a generation request is in flight
    pub fn is_submitting(&self) -> bool {
        self.slot == SlotState::Submitting
    }

    /// `idle --submit--> submitting`, guarded.
    ///
    /// Rejected (returns None, no state change) when the prompt is empty
    /// after trimming or when a submission is already in flight. On
    /// accept, the slot moves to Submitting and the caller receives the
    /// trimmed prompt plus a settings snapshot to issue exactly one call.
    pub fn begin_submission(&mut self, prompt: &str) -> Option<Submission> {
        let trimmed = prompt.trim();
        if trimmed.is_empty() || self.slot == SlotState::Submitting {
            return None;
        }

        self.slot = SlotState::Submitting;
        Some(Submission {
            prompt: trimmed.to_string(),
            settings: self.settings,
        })
    }

    /// `submitting --success--> idle`.
    ///
    /// Builds one gallery entry per payload, prepends them (newest first)
    /// and selects the first new image, replacing any prior selection.
    pub fn complete_submission(&mut self, submission: &Submission, payloads: &[ImagePayload]) {
        let new_images: Vec<GeneratedImage> = payloads
            .iter()
            .map(|p| GeneratedImage::from_payload(p, &submission.prompt, submission.settings))
            .collect();

        if let Some(first) = new_images.first() {
            self.selected = Some(first.id.clone());
        }

        self.gallery.splice(0..0, new_images);
        self.slot = SlotState::Idle;
    }

    /// `submitting --failure--> idle`: gallery and selection untouched,
    /// no partial results are kept.
    pub fn fail_submission(&mut self) {
        self.slot = SlotState::Idle;
    }

    /// Remove an image from the gallery, allowed in any slot state.
    /// Deleting the selected image clears the selection; no replacement
    /// is auto-selected. Returns the removed entry.
    pub fn delete(&mut self, id: &str) -> Option<GeneratedImage> {
        let index = self.gallery.iter().position(|img| img.id == id)?;
        let removed = self.gallery.remove(index);

        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }

        Some(removed)
    }

    /// Select an image by id; no-op if the id is not in the gallery
    pub fn select(&mut self, id: &str) {
        if self.gallery.iter().any(|img| img.id == id) {
            self.selected = Some(id.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::{AspectRatio, ImageSize};

    fn png_payload() -> ImagePayload {
        ImagePayload {
            bytes: vec![0x89, 0x50, 0x4E, 0x47],
            mime_type: "image/png".to_string(),
        }
    }

    #[test]
    fn test_submit_trims_and_snapshots_settings() {
        let mut session = Session::new();
        session.settings = GenerationSettings {
            aspect_ratio: AspectRatio::Wide,
            image_size: ImageSize::TwoK,
        };

        let submission = session.begin_submission("  a red fox  ").unwrap();
        assert_eq!(submission.prompt, "a red fox");
        assert_eq!(submission.settings.aspect_ratio, AspectRatio::Wide);
        assert_eq!(submission.settings.image_size, ImageSize::TwoK);
        assert!(session.is_submitting());

        // Settings changed mid-generation only apply to the next submit
        session.settings.image_size = ImageSize::FourK;
        assert_eq!(submission.settings.image_size, ImageSize::TwoK);
    }

    #[test]
    fn test_blank_prompt_is_rejected() {
        let mut session = Session::new();
        assert!(session.begin_submission("").is_none());
        assert!(session.begin_submission("   \n\t ").is_none());
        assert!(!session.is_submitting());
    }

    #[test]
    fn test_second_submit_while_in_flight_is_a_no_op() {
        let mut session = Session::new();
        assert!(session.begin_submission("first").is_some());
        // No second call is issued and the slot state is unchanged
        assert!(session.begin_submission("second").is_none());
        assert!(session.is_submitting());
    }

    #[test]
    fn test_success_prepends_and_selects_first_new_image() {
        let mut session = Session::new();

        let old = session.begin_submission("old prompt").unwrap();
        session.complete_submission(&old, &[png_payload()]);
        let old_id = session.gallery()[0].id.clone();

        let submission = session.begin_submission("a red fox").unwrap();
        session.complete_submission(&submission, &[png_payload(), png_payload()]);

        assert!(!session.is_submitting());
        assert_eq!(session.gallery().len(), 3);
        // Newest first, the older image pushed down
        assert_eq!(session.gallery()[2].id, old_id);
        assert_eq!(session.gallery()[0].prompt, "a red fox");
        assert_eq!(session.gallery()[1].prompt, "a red fox");
        // The first new image becomes the selection
        assert_eq!(session.selected_id(), Some(session.gallery()[0].id.as_str()));
    }

    #[test]
    fn test_gallery_entries_carry_submission_verbatim() {
        let mut session = Session::new();
        session.settings = GenerationSettings {
            aspect_ratio: AspectRatio::Tall,
            image_size: ImageSize::FourK,
        };

        let submission = session.begin_submission("neon city at dusk").unwrap();
        session.complete_submission(&submission, &[png_payload()]);

        let entry = &session.gallery()[0];
        assert_eq!(entry.prompt, "neon city at dusk");
        assert_eq!(entry.aspect_ratio, AspectRatio::Tall);
        assert_eq!(entry.size, ImageSize::FourK);
        assert!(entry.url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_no_duplicate_ids_across_generations() {
        let mut session = Session::new();
        for _ in 0..3 {
            let submission = session.begin_submission("prompt").unwrap();
            session.complete_submission(&submission, &[png_payload(), png_payload()]);
        }

        let mut ids: Vec<&str> = session.gallery().iter().map(|i| i.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), session.gallery().len());
    }

    #[test]
    fn test_failure_leaves_gallery_and_selection_alone() {
        let mut session = Session::new();
        let first = session.begin_submission("first").unwrap();
        session.complete_submission(&first, &[png_payload()]);
        let selected = session.selected_id().map(str::to_string);

        let second = session.begin_submission("second").unwrap();
        session.fail_submission();
        drop(second);

        assert!(!session.is_submitting());
        assert_eq!(session.gallery().len(), 1);
        assert_eq!(session.selected_id().map(str::to_string), selected);
    }

    #[test]
    fn test_delete_selected_clears_selection() {
        let mut session = Session::new();
        let submission = session.begin_submission("prompt").unwrap();
        session.complete_submission(&submission, &[png_payload(), png_payload()]);

        let selected_id = session.selected_id().unwrap().to_string();
        session.delete(&selected_id);

        assert_eq!(session.gallery().len(), 1);
        // No replacement is auto-selected
        assert_eq!(session.selected_id(), None);
        assert!(session.selected_image().is_none());
    }

    #[test]
    fn test_delete_non_selected_keeps_selection() {
        let mut session = Session::new();
        let submission = session.begin_submission("prompt").unwrap();
        session.complete_submission(&submission, &[png_payload(), png_payload()]);

        let selected_id = session.selected_id().unwrap().to_string();
        let other_id = session.gallery()[1].id.clone();
        session.delete(&other_id);

        assert_eq!(session.gallery().len(), 1);
        assert_eq!(session.selected_id(), Some(selected_id.as_str()));
    }

    #[test]
    fn test_delete_works_while_submitting() {
        let mut session = Session::new();
        let first = session.begin_submission("first").unwrap();
        session.complete_submission(&first, &[png_payload()]);
        let id = session.gallery()[0].id.clone();

        let _second = session.begin_submission("second").unwrap();
        assert!(session.delete(&id).is_some());
        assert!(session.is_submitting());
        assert!(session.gallery().is_empty());
    }

    #[test]
    fn test_select_unknown_id_is_a_no_op() {
        let mut session = Session::new();
        let submission = session.begin_submission("prompt").unwrap();
        session.complete_submission(&submission, &[png_payload()]);
        let selected = session.selected_id().map(str::to_string);

        session.select("not-a-real-id");
        assert_eq!(session.selected_id().map(str::to_string), selected);
    }

    #[test]
    fn test_select_switches_between_gallery_entries() {
        let mut session = Session::new();
        let submission = session.begin_submission("prompt").unwrap();
        session.complete_submission(&submission, &[png_payload(), png_payload()]);

        let other_id = session.gallery()[1].id.clone();
        session.select(&other_id);
        assert_eq!(session.selected_id(), Some(other_id.as_str()));
    }
}
