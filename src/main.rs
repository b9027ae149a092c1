use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use iced::widget::image;
use iced::{Element, Task, Theme};
use rfd::FileDialog;

mod access;
mod config;
mod gemini;
mod state;
mod ui;

use access::{AccessError, AccessState, EnvKeyHost, SharedKeyHost};
use gemini::client::GenerationError;
use state::data::{AspectRatio, ImagePayload, ImageSize};
use state::session::{Session, Submission};

/// Main application state
struct NanoStudio {
    /// Access gate state, checked once at startup
    access: AccessState,
    /// Injected key host capability; None models a host-less environment
    key_host: Option<SharedKeyHost>,
    /// True while the key selector is open
    selecting_key: bool,
    /// Last key selection failure, shown on the access screen
    access_error: Option<AccessError>,

    /// Prompt text being edited
    prompt: String,
    /// Gallery, selection and the single generation slot
    session: Session,
    /// The submission matching the in-flight generation call, if any
    pending: Option<Submission>,
    /// Decoded image handles per gallery id, so views never re-decode
    handles: HashMap<String, image::Handle>,
    /// Inline generation error banner, dismissable
    error: Option<String>,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// Startup access check finished
    AccessChecked(AccessState),
    /// User clicked "Select API Key"
    SelectKey,
    /// Key selector finished
    KeySelected(Result<(), AccessError>),

    /// Prompt text edited
    PromptChanged(String),
    /// Aspect ratio picked in the sidebar
    AspectRatioSelected(AspectRatio),
    /// Resolution picked in the sidebar
    ImageSizeSelected(ImageSize),
    /// User submitted the prompt
    Generate,
    /// Generation call finished
    GenerationComplete(Result<Vec<ImagePayload>, GenerationError>),

    /// Thumbnail clicked
    SelectImage(String),
    /// Delete requested for a gallery image
    DeleteImage(String),
    /// Save-as requested for a gallery image
    DownloadImage(String),
    /// Background save finished with the target path or an error
    DownloadComplete(Result<String, String>),
    /// Error banner dismissed
    DismissError,
}

impl NanoStudio {
    /// Create a new instance and kick off the one-time access check
    fn new() -> (Self, Task<Message>) {
        config::load();

        let key_host: Option<SharedKeyHost> = Some(Arc::new(EnvKeyHost));

        let app = NanoStudio {
            access: AccessState::Checking,
            key_host: key_host.clone(),
            selecting_key: false,
            access_error: None,
            prompt: String::new(),
            session: Session::new(),
            pending: None,
            handles: HashMap::new(),
            error: None,
            status: "Checking access...".to_string(),
        };

        (
            app,
            Task::perform(access::check_access(key_host), Message::AccessChecked),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::AccessChecked(state) => {
                self.access = state;
                self.status = match state {
                    AccessState::Granted => "Ready.".to_string(),
                    _ => "Select an API key to continue.".to_string(),
                };
                Task::none()
            }
            Message::SelectKey => {
                self.selecting_key = true;
                self.access_error = None;
                Task::perform(
                    access::request_access(self.key_host.clone()),
                    Message::KeySelected,
                )
            }
            Message::KeySelected(result) => {
                self.selecting_key = false;
                match result {
                    Ok(()) => {
                        // Optimistic: no error from the selector counts as granted
                        self.access = AccessState::Granted;
                        self.status = "Ready.".to_string();
                    }
                    Err(error) => {
                        self.access_error = Some(error);
                    }
                }
                Task::none()
            }

            Message::PromptChanged(prompt) => {
                self.prompt = prompt;
                Task::none()
            }
            Message::AspectRatioSelected(ratio) => {
                self.session.settings.aspect_ratio = ratio;
                Task::none()
            }
            Message::ImageSizeSelected(size) => {
                self.session.settings.image_size = size;
                Task::none()
            }

            Message::Generate => {
                // The session guards blank prompts and double submission
                let Some(submission) = self.session.begin_submission(&self.prompt) else {
                    return Task::none();
                };

                let Some(api_key) = config::api_key() else {
                    self.session.fail_submission();
                    self.error =
                        Some("No API key configured. Re-select your key and try again.".to_string());
                    return Task::none();
                };

                self.status = "Generating...".to_string();
                let prompt = submission.prompt.clone();
                let settings = submission.settings;
                self.pending = Some(submission);

                Task::perform(
                    gemini::client::generate_images(api_key, prompt, settings),
                    Message::GenerationComplete,
                )
            }
            Message::GenerationComplete(Ok(payloads)) => {
                let Some(submission) = self.pending.take() else {
                    return Task::none();
                };

                self.session.complete_submission(&submission, &payloads);

                // Cache a render handle for each new gallery entry
                for entry in self.session.gallery().iter().take(payloads.len()) {
                    if let Some(bytes) = entry.decoded_bytes() {
                        self.handles
                            .insert(entry.id.clone(), image::Handle::from_bytes(bytes));
                    }
                }

                println!("✅ Generated {} image(s)", payloads.len());
                self.status = format!(
                    "Generated {} image(s). {} in gallery.",
                    payloads.len(),
                    self.session.gallery().len()
                );
                Task::none()
            }
            Message::GenerationComplete(Err(error)) => {
                self.pending = None;
                self.session.fail_submission();

                eprintln!("❌ Generation failed: {}", error);
                self.error = Some(format!("Failed to generate image: {}", error));
                self.status = "Generation failed.".to_string();
                Task::none()
            }

            Message::SelectImage(id) => {
                self.session.select(&id);
                Task::none()
            }
            Message::DeleteImage(id) => {
                if self.session.delete(&id).is_some() {
                    self.handles.remove(&id);
                    self.status = format!("Deleted. {} in gallery.", self.session.gallery().len());
                }
                Task::none()
            }

            Message::DownloadImage(id) => {
                let Some(bytes) = self
                    .session
                    .gallery()
                    .iter()
                    .find(|img| img.id == id)
                    .and_then(|img| img.decoded_bytes())
                else {
                    return Task::none();
                };

                // Native save-as dialog, pre-filled like the download action
                let target = FileDialog::new()
                    .set_title("Save Image")
                    .set_file_name(format!("nano-banana-pro-{}.png", id))
                    .set_directory(dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")))
                    .save_file();

                if let Some(path) = target {
                    return Task::perform(save_image_async(path, bytes), Message::DownloadComplete);
                }

                Task::none()
            }
            Message::DownloadComplete(Ok(path)) => {
                println!("💾 Saved image to {}", path);
                self.status = format!("Saved to {}", path);
                Task::none()
            }
            Message::DownloadComplete(Err(error)) => {
                eprintln!("❌ Save failed: {}", error);
                self.error = Some(format!("Could not save image: {}", error));
                Task::none()
            }

            Message::DismissError => {
                self.error = None;
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        match self.access {
            AccessState::Checking => ui::access_screen::checking(),
            AccessState::Denied => {
                ui::access_screen::view(self.access_error.as_ref(), self.selecting_key)
            }
            AccessState::Granted => ui::generator::view(
                &self.prompt,
                &self.session,
                &self.handles,
                self.error.as_deref(),
                &self.status,
            ),
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    iced::application(
        "Nano Studio",
        NanoStudio::update,
        NanoStudio::view,
    )
    .theme(NanoStudio::theme)
    .centered()
    .run_with(NanoStudio::new)
}

/// Write decoded image bytes to disk without blocking the UI thread
async fn save_image_async(path: PathBuf, bytes: Vec<u8>) -> Result<String, String> {
    tokio::fs::write(&path, bytes)
        .await
        .map_err(|e| format!("{}: {}", path.display(), e))?;
    Ok(path.display().to_string())
}
