use ratatui::style::Color;
use ratatui::text::Line;

use super::Bubble;
use super::BubbleAlignment;
use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::MessageType;

fn line_to_string(line: &Line) -> String {
    return line
        .spans
        .iter()
        .map(|span| {
            return span.content.to_string();
        })
        .collect::<Vec<String>>()
        .join("");
}

#[test]
fn it_renders_a_left_aligned_bubble() {
    let message = Message::new(Author::Supercakes, "Hi!");
    let lines = Bubble::new(&message, BubbleAlignment::Left, 50).as_lines();
    let rendered = lines.iter().map(line_to_string).collect::<Vec<String>>();

    assert_eq!(rendered.len(), 3);
    assert!(rendered[0].starts_with("╭Supercakes"));
    assert!(rendered[0].trim_end().ends_with('╮'));
    assert!(rendered[1].starts_with("│ Hi!"));
    assert!(rendered[1].trim_end().ends_with('│'));
    assert!(rendered[2].starts_with('╰'));
    assert!(rendered[2].trim_end().ends_with('╯'));
}

#[test]
fn it_renders_a_right_aligned_bubble() {
    let message = Message::new(Author::Supercakes, "Hi!");
    let lines = Bubble::new(&message, BubbleAlignment::Right, 50).as_lines();
    let rendered = lines.iter().map(line_to_string).collect::<Vec<String>>();

    assert!(rendered[0].starts_with(' '));
    assert!(rendered[0].trim_start().starts_with("╭Supercakes"));
    assert!(rendered[0].ends_with('╮'));
    assert!(rendered[1].ends_with('│'));
    assert!(rendered[2].ends_with('╯'));
}

#[test]
fn it_wraps_long_messages_to_the_window_width() {
    let message = Message::new(
        Author::Supercakes,
        "Un pastel de tres pisos con flores azules y un toque de chocolate amargo por encima",
    );
    let lines = Bubble::new(&message, BubbleAlignment::Left, 40).as_lines();

    assert!(lines.len() > 3);
    for line in &lines {
        assert!(line_to_string(line).chars().count() <= 40);
    }
}

#[test]
fn it_includes_image_markers_in_the_bubble() {
    let mut message = Message::new(Author::Model, "Aquí está tu diseño.");
    message.generated_image = Some("https://images.example/cake".to_string());

    let lines = Bubble::new(&message, BubbleAlignment::Left, 80).as_lines();
    let rendered = lines
        .iter()
        .map(line_to_string)
        .collect::<Vec<String>>()
        .join("\n");

    assert!(rendered.contains("[vista previa del diseño:"));
}

#[test]
fn it_styles_error_bubbles_red() {
    let message = Message::new_with_type(Author::Supercakes, MessageType::Error, "Algo falló");
    let lines = Bubble::new(&message, BubbleAlignment::Left, 50).as_lines();

    assert_eq!(lines[0].spans[0].style.fg, Some(Color::Red));
}

#[test]
fn it_leaves_user_bubbles_unstyled() {
    let message = Message::new(Author::User, "Quiero un pastel");
    let lines = Bubble::new(&message, BubbleAlignment::Right, 50).as_lines();

    assert_eq!(lines[0].spans[0].style.fg, None);
}
