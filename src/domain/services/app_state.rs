#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use std::fs;
use std::path::Path;

use anyhow::Result;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;

use super::actions::help_text;
use super::BubbleList;
use super::OrderUpdates;
use super::Scroll;
use crate::domain::models::Action;
use crate::domain::models::Attachment;
use crate::domain::models::Author;
use crate::domain::models::BackendPrompt;
use crate::domain::models::BackendResponse;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::Order;
use crate::domain::models::SlashCommand;
use crate::domain::models::GREETING;
use crate::infrastructure::backends::BackendManager;

const ATTACHMENT_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

pub struct AppState<'a> {
    pub attachments: Vec<Attachment>,
    pub backend_context: String,
    pub bubble_list: BubbleList<'a>,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub messages: Vec<Message>,
    pub order: Order,
    pub scroll: Scroll,
    pub waiting_for_backend: bool,
}

impl<'a> AppState<'a> {
    pub async fn new() -> Result<AppState<'a>> {
        let mut app_state = AppState {
            attachments: vec![],
            backend_context: "".to_string(),
            bubble_list: BubbleList::new(),
            last_known_height: 0,
            last_known_width: 0,
            messages: vec![],
            order: Order::default(),
            scroll: Scroll::default(),
            waiting_for_backend: false,
        };

        // The first terminal draw sizes the bubble list through set_rect.
        app_state.messages.push(Message::new(Author::Model, GREETING));

        let backend = BackendManager::get();
        if let Err(err) = backend.health_check().await {
            app_state.messages.push(Message::new_with_type(
                Author::Supercakes,
                MessageType::Error,
                &format!("No puedo conectar con el asistente en este momento. Revisa la configuración antes de continuar.\n\nError: {err}"),
            ));
        }

        return Ok(app_state);
    }

    /// Quit, help, and attach are handled before a message ever reaches the
    /// backend. Returns (should_break, should_continue) for the UI loop.
    pub fn handle_slash_commands(
        &mut self,
        input_str: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<(bool, bool)> {
        if let Some(command) = SlashCommand::parse(input_str) {
            if command.is_quit() {
                return Ok((true, false));
            }

            if command.is_help() {
                self.add_message(Message::new(Author::Supercakes, &help_text()));
                return Ok((false, true));
            }

            if command.is_attach() {
                if command.args.is_empty() {
                    self.add_message(Message::new_with_type(
                        Author::Supercakes,
                        MessageType::Error,
                        "Debes indicar la ruta de la imagen, por ejemplo: /adjuntar ./pastel.png",
                    ));
                    return Ok((false, true));
                }

                if let Some(attachment) = self.add_attachment(&command.args.join(" ")) {
                    self.waiting_for_backend = true;
                    let ack_prompt = format!(
                        "He adjuntado una imagen de referencia llamada {} para el diseño del pastel.",
                        attachment.filename
                    );
                    tx.send(Action::BackendRequest(BackendPrompt::new(
                        ack_prompt,
                        self.backend_context.clone(),
                    )))?;
                }

                return Ok((false, true));
            }
        }

        return Ok((false, false));
    }

    /// Accepts png/jpg/jpeg files only, deduplicated by canonical path. A
    /// rejected file leaves an error message in the transcript instead.
    pub fn add_attachment(&mut self, raw_path: &str) -> Option<Attachment> {
        let path = Path::new(raw_path);

        let extension = path
            .extension()
            .map(|ext| {
                return ext.to_string_lossy().to_lowercase();
            })
            .unwrap_or_default();
        if !ATTACHMENT_EXTENSIONS.contains(&extension.as_str()) {
            self.add_message(Message::new_with_type(
                Author::Supercakes,
                MessageType::Error,
                "Solo puedo aceptar imágenes png, jpg o jpeg.",
            ));
            return None;
        }

        let canonical = match fs::canonicalize(path) {
            Ok(canonical) => canonical.to_string_lossy().to_string(),
            Err(err) => {
                self.add_message(Message::new_with_type(
                    Author::Supercakes,
                    MessageType::Error,
                    &format!("No pude leer la imagen en {raw_path}: {err}"),
                ));
                return None;
            }
        };

        if self.attachments.iter().any(|attachment| {
            return attachment.path == canonical;
        }) {
            self.add_message(Message::new(
                Author::Supercakes,
                "Esa imagen ya está adjunta al pedido.",
            ));
            return None;
        }

        let attachment = Attachment {
            filename: path
                .file_name()
                .map(|name| {
                    return name.to_string_lossy().to_string();
                })
                .unwrap_or_else(|| {
                    return raw_path.to_string();
                }),
            path: canonical,
        };
        self.attachments.push(attachment.clone());

        let mut message = Message::new(Author::User, "Imagen de referencia para el diseño.");
        message.attachment = Some(attachment.clone());
        self.add_message(message);

        return Some(attachment);
    }

    pub fn handle_backend_response(&mut self, res: BackendResponse) {
        self.messages.push(Message::new(res.author, &res.text));
        self.waiting_for_backend = false;

        if let Some(context) = res.context {
            self.backend_context = context;
        }

        self.sync_dependants();
        self.scroll.last();
    }

    /// Attaches a generated preview URL to the reply it belongs to, the most
    /// recent model message.
    pub fn handle_design_preview(&mut self, url: String) {
        if let Some(message) = self
            .messages
            .iter_mut()
            .rev()
            .find(|message| {
                return message.author == Author::Model;
            })
        {
            message.generated_image = Some(url);
        }

        self.sync_dependants();
    }

    pub fn update_order(&mut self, text: &str) {
        OrderUpdates::apply(&mut self.order, text);
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
        self.sync_dependants();
        self.scroll.last();
    }

    fn sync_dependants(&mut self) {
        self.bubble_list
            .set_messages(&self.messages, self.last_known_width.into());

        self.scroll
            .set_state(self.bubble_list.len() as u16, self.last_known_height);

        if self.waiting_for_backend {
            self.scroll.last();
        }
    }
}
