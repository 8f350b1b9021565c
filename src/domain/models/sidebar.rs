#[cfg(test)]
#[path = "sidebar_test.rs"]
mod tests;

use ratatui::prelude::Backend;
use ratatui::prelude::Rect;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::Attachment;
use super::Currency;
use super::Order;

#[derive(Default)]
pub struct Sidebar {}

impl Sidebar {
    /// One line per populated order field, price prefixed with the active
    /// currency symbol. Empty fields are skipped entirely.
    pub fn as_lines(order: &Order, attachments: &[Attachment]) -> Vec<String> {
        let mut lines: Vec<String> = vec![];

        if let Some(design) = &order.design {
            lines.push(format!("Diseño: {design}"));
        }
        if let Some(portions) = order.portions {
            lines.push(format!("Porciones: {portions}"));
        }
        if let Some(flavor) = order.flavor {
            lines.push(format!("Sabor: {flavor}"));
        }
        if let Some(delivery_date) = order.delivery_date {
            lines.push(format!(
                "Fecha de entrega: {}",
                delivery_date.format("%d/%m/%Y")
            ));
        }
        if let Some(price) = order.price {
            lines.push(format!("Precio: {}{price}", Currency::active().symbol()));
        }

        if !attachments.is_empty() {
            if !lines.is_empty() {
                lines.push(" ".to_string());
            }
            lines.push("Imágenes de referencia:".to_string());
            for attachment in attachments {
                lines.push(format!("- {}", attachment.filename));
            }
        }

        return lines;
    }

    pub fn render<B: Backend>(
        &self,
        frame: &mut Frame<B>,
        rect: Rect,
        order: &Order,
        attachments: &[Attachment],
    ) {
        let lines = Sidebar::as_lines(order, attachments);

        frame.render_widget(
            Paragraph::new(lines.join("\n")).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .title("Detalles del Pedido")
                    .padding(Padding::new(1, 1, 1, 1)),
            ),
            rect,
        );
    }
}
