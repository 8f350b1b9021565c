use anyhow::bail;
use anyhow::Result;
use tokio::sync::mpsc;

use super::AppState;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::BackendResponse;
use crate::domain::models::Flavor;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::Order;
use crate::domain::services::BubbleList;
use crate::domain::services::Scroll;

impl Default for AppState<'static> {
    fn default() -> AppState<'static> {
        return AppState {
            attachments: vec![],
            backend_context: "".to_string(),
            bubble_list: BubbleList::new(),
            last_known_height: 300,
            last_known_width: 100,
            messages: vec![],
            order: Order::default(),
            scroll: Scroll::default(),
            waiting_for_backend: false,
        };
    }
}

mod handle_backend_response {
    use super::*;

    #[test]
    fn it_appends_the_reply_and_stores_context() {
        let mut app_state = AppState::default();
        app_state.waiting_for_backend = true;

        app_state.handle_backend_response(BackendResponse {
            author: Author::Model,
            text: "¡Claro! ¿De qué sabor lo quieres?".to_string(),
            context: Some("[serialized]".to_string()),
        });

        assert!(!app_state.waiting_for_backend);
        assert_eq!(app_state.backend_context, "[serialized]");

        let last_message = app_state.messages.last().unwrap();
        assert_eq!(last_message.author, Author::Model);
        assert_eq!(last_message.text, "¡Claro! ¿De qué sabor lo quieres?");
    }

    #[test]
    fn it_keeps_the_previous_context_when_none_is_returned() {
        let mut app_state = AppState::default();
        app_state.backend_context = "[previous]".to_string();

        app_state.handle_backend_response(BackendResponse {
            author: Author::Model,
            text: "Lo siento, hubo un error al procesar tu solicitud. Por favor, intenta de nuevo."
                .to_string(),
            context: None,
        });

        assert_eq!(app_state.backend_context, "[previous]");
    }
}

mod handle_design_preview {
    use super::*;

    #[test]
    fn it_attaches_the_preview_to_the_latest_model_message() {
        let mut app_state = AppState::default();
        app_state.add_message(Message::new(Author::Model, "Aquí está tu diseño."));
        app_state.add_message(Message::new(Author::User, "¡Gracias!"));

        app_state.handle_design_preview("https://images.example/cake".to_string());

        assert_eq!(
            app_state.messages[0].generated_image,
            Some("https://images.example/cake".to_string())
        );
        assert_eq!(app_state.messages[1].generated_image, None);
    }

    #[test]
    fn it_does_nothing_without_a_model_message() {
        let mut app_state = AppState::default();
        app_state.add_message(Message::new(Author::User, "Hola"));

        app_state.handle_design_preview("https://images.example/cake".to_string());

        assert_eq!(app_state.messages[0].generated_image, None);
    }
}

mod handle_slash_commands {
    use super::*;

    #[test]
    fn it_breaks_on_quit() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();
        let (should_break, should_continue) = app_state.handle_slash_commands("/q", &tx)?;

        assert!(should_break);
        assert!(!should_continue);
        assert!(!app_state.waiting_for_backend);

        return Ok(());
    }

    #[test]
    fn it_prints_help() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();
        let (should_break, should_continue) = app_state.handle_slash_commands("/help", &tx)?;

        assert!(!should_break);
        assert!(should_continue);

        let last_message = app_state.messages.last().unwrap();
        assert_eq!(last_message.author, Author::Supercakes);
        assert!(last_message.text.contains("/adjuntar"));

        return Ok(());
    }

    #[test]
    fn it_passes_plain_messages_through() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();
        let (should_break, should_continue) =
            app_state.handle_slash_commands("Quiero un pastel", &tx)?;

        assert!(!should_break);
        assert!(!should_continue);

        return Ok(());
    }

    #[test]
    fn it_rejects_attach_without_a_path() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();
        let (should_break, should_continue) = app_state.handle_slash_commands("/attach", &tx)?;

        assert!(!should_break);
        assert!(should_continue);

        let last_message = app_state.messages.last().unwrap();
        assert_eq!(last_message.message_type(), MessageType::Error);

        return Ok(());
    }

    #[test]
    fn it_attaches_an_image_and_requests_an_acknowledgment() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();
        let (should_break, should_continue) =
            app_state.handle_slash_commands("/adjuntar ./test/cake.png", &tx)?;

        assert!(!should_break);
        assert!(should_continue);
        assert!(app_state.waiting_for_backend);
        assert_eq!(app_state.attachments.len(), 1);
        assert_eq!(app_state.attachments[0].filename, "cake.png");

        let last_message = app_state.messages.last().unwrap();
        assert_eq!(last_message.author, Author::User);
        assert!(last_message.attachment.is_some());

        match rx.blocking_recv().unwrap() {
            Action::BackendRequest(prompt) => {
                assert!(prompt.text.contains("cake.png"));
            }
            _ => bail!("Wrong enum"),
        }

        return Ok(());
    }

    #[test]
    fn it_deduplicates_attachments() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();

        app_state.handle_slash_commands("/adjuntar ./test/cake.png", &tx)?;
        app_state.waiting_for_backend = false;
        app_state.handle_slash_commands("/adjuntar ./test/cake.png", &tx)?;

        assert_eq!(app_state.attachments.len(), 1);
        assert!(!app_state.waiting_for_backend);

        // Only the first attach produced an acknowledgment request.
        assert!(rx.blocking_recv().is_some());
        assert!(rx.try_recv().is_err());

        return Ok(());
    }
}

mod add_attachment {
    use super::*;

    #[test]
    fn it_rejects_unsupported_extensions() {
        let mut app_state = AppState::default();
        let res = app_state.add_attachment("./Cargo.toml");

        assert!(res.is_none());
        assert!(app_state.attachments.is_empty());

        let last_message = app_state.messages.last().unwrap();
        assert_eq!(last_message.message_type(), MessageType::Error);
        assert!(last_message.text.contains("png, jpg o jpeg"));
    }

    #[test]
    fn it_rejects_missing_files() {
        let mut app_state = AppState::default();
        let res = app_state.add_attachment("./test/missing.png");

        assert!(res.is_none());
        assert!(app_state.attachments.is_empty());

        let last_message = app_state.messages.last().unwrap();
        assert_eq!(last_message.message_type(), MessageType::Error);
    }
}

mod update_order {
    use super::*;

    #[test]
    fn it_fills_the_order_from_a_message() {
        let mut app_state = AppState::default();
        app_state.update_order("Quiero un pastel de chocolate para 20 porciones");

        assert_eq!(app_state.order.flavor, Some(Flavor::Chocolate));
        assert_eq!(app_state.order.portions, Some(20));
        assert_eq!(app_state.order.price, Some(150));
    }
}
