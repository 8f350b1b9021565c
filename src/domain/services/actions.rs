use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::OrderUpdates;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::BackendResponse;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::FALLBACK_REPLY;
use crate::infrastructure::backends::BackendManager;

pub fn help_text() -> String {
    let text = r#"
COMANDOS:
- /adjuntar (/attach) [RUTA] - Adjunta una imagen de referencia del diseño (png, jpg o jpeg).
- /quit /exit (/q) - Salir del asistente.
- /help (/h) - Muestra esta ayuda.

ATAJOS:
- Flecha arriba / abajo - Desplaza la conversación.
- CTRL+U / CTRL+D - Sube o baja una página.
- CTRL+C - Cancela la respuesta en curso, o sale si no hay ninguna.
        "#;

    return text.trim().to_string();
}

fn completion_error(err: anyhow::Error, tx: &mpsc::UnboundedSender<Event>) -> Result<()> {
    tx.send(Event::BackendMessage(Message::new_with_type(
        Author::Supercakes,
        MessageType::Error,
        &format!("Error al obtener respuesta: {:?}", err),
    )))?;

    // The transcript never ends a turn without a reply.
    tx.send(Event::BackendPromptResponse(BackendResponse {
        author: Author::Model,
        text: FALLBACK_REPLY.to_string(),
        context: None,
    }))?;

    return Ok(());
}

fn image_error(err: anyhow::Error, tx: &mpsc::UnboundedSender<Event>) -> Result<()> {
    tx.send(Event::BackendMessage(Message::new_with_type(
        Author::Supercakes,
        MessageType::Error,
        &format!("Error al generar la imagen: {:?}", err),
    )))?;

    return Ok(());
}

pub struct ActionsService {}

impl ActionsService {
    pub async fn start(
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        // Lazy default.
        let mut worker: JoinHandle<Result<()>> = tokio::spawn(async {
            return Ok(());
        });

        loop {
            let event = rx.recv().await;
            if event.is_none() {
                continue;
            }

            let worker_tx = tx.clone();
            match event.unwrap() {
                Action::BackendAbort() => {
                    worker.abort();
                }
                Action::BackendRequest(prompt) => {
                    worker = tokio::spawn(async move {
                        let backend = BackendManager::get();

                        let wants_preview = OrderUpdates::requests_design_preview(&prompt.text)
                            && Config::get(ConfigKey::ImageGeneration) == "true";
                        let design = prompt.text.to_string();

                        match backend.get_completion(prompt).await {
                            Ok(res) => {
                                worker_tx.send(Event::BackendPromptResponse(res))?;
                            }
                            Err(err) => {
                                completion_error(err, &worker_tx)?;
                                return Ok(());
                            }
                        }

                        if wants_preview {
                            match backend.generate_image(&design).await {
                                Ok(url) => {
                                    worker_tx.send(Event::DesignPreviewReady(url))?;
                                }
                                Err(err) => {
                                    // The turn simply goes without a preview.
                                    image_error(err, &worker_tx)?;
                                }
                            }
                        }

                        return Ok(());
                    });
                }
            }
        }
    }
}
