use chrono::NaiveDate;

use super::Sidebar;
use crate::domain::models::Attachment;
use crate::domain::models::Flavor;
use crate::domain::models::Order;

#[test]
fn it_skips_empty_fields() {
    let order = Order::default();
    let lines = Sidebar::as_lines(&order, &[]);
    assert!(lines.is_empty());
}

#[test]
fn it_lists_populated_fields_with_currency_prefix() {
    let order = Order {
        design: None,
        portions: Some(20),
        flavor: Some(Flavor::Chocolate),
        delivery_date: None,
        price: Some(150),
    };

    let lines = Sidebar::as_lines(&order, &[]);
    assert_eq!(lines, vec!["Porciones: 20", "Sabor: Chocolate", "Precio: $150"]);
}

#[test]
fn it_formats_the_delivery_date() {
    let order = Order {
        delivery_date: NaiveDate::from_ymd_opt(2024, 3, 20),
        ..Order::default()
    };

    let lines = Sidebar::as_lines(&order, &[]);
    assert_eq!(lines, vec!["Fecha de entrega: 20/03/2024"]);
}

#[test]
fn it_lists_reference_images_after_order_fields() {
    let order = Order {
        portions: Some(10),
        price: Some(100),
        ..Order::default()
    };
    let attachments = vec![Attachment {
        filename: "cake.png".to_string(),
        path: "/tmp/cake.png".to_string(),
    }];

    let lines = Sidebar::as_lines(&order, &attachments);
    assert_eq!(
        lines,
        vec![
            "Porciones: 10",
            "Precio: $100",
            " ",
            "Imágenes de referencia:",
            "- cake.png"
        ]
    );
}
