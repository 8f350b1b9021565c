use super::OrderUpdates;
use super::PortionScan;
use crate::domain::models::Flavor;
use crate::domain::models::Order;

mod scan_portions {
    use super::*;

    #[test]
    fn it_finds_a_portion_count() {
        let res = OrderUpdates::scan_portions("Quiero 12 porciones");
        assert_eq!(res, PortionScan::Found(12));
    }

    #[test]
    fn it_is_case_insensitive() {
        let res = OrderUpdates::scan_portions("20 PORCIONES por favor");
        assert_eq!(res, PortionScan::Found(20));
    }

    #[test]
    fn it_concatenates_every_digit_in_the_message() {
        let res = OrderUpdates::scan_portions("Un pastel de 2 pisos y 10 porciones");
        assert_eq!(res, PortionScan::Found(210));
    }

    #[test]
    fn it_returns_unparseable_without_digits() {
        let res = OrderUpdates::scan_portions("Quiero muchas porciones");
        assert_eq!(res, PortionScan::Unparseable);
    }

    #[test]
    fn it_returns_absent_without_a_mention() {
        let res = OrderUpdates::scan_portions("Quiero un pastel de chocolate");
        assert_eq!(res, PortionScan::Absent);
    }
}

mod scan_flavor {
    use super::*;

    #[test]
    fn it_matches_a_flavor_case_insensitively() {
        let res = OrderUpdates::scan_flavor("me gustaría de fresa");
        assert_eq!(res, Some(Flavor::Fresa));
    }

    #[test]
    fn it_matches_red_velvet() {
        let res = OrderUpdates::scan_flavor("Mejor de Red Velvet");
        assert_eq!(res, Some(Flavor::RedVelvet));
    }

    #[test]
    fn it_prefers_the_first_flavor_in_priority_order() {
        let res = OrderUpdates::scan_flavor("No sé si de fresa o de chocolate");
        assert_eq!(res, Some(Flavor::Chocolate));
    }

    #[test]
    fn it_matches_nothing_without_a_flavor() {
        let res = OrderUpdates::scan_flavor("Un pastel para una boda");
        assert_eq!(res, None);
    }
}

mod requests_design_preview {
    use super::*;

    #[test]
    fn it_detects_preview_requests() {
        assert!(OrderUpdates::requests_design_preview(
            "Muéstrame el diseño del pastel"
        ));
        assert!(OrderUpdates::requests_design_preview(
            "quiero ver el diseño"
        ));
        assert!(OrderUpdates::requests_design_preview(
            "Genera una imagen del pastel"
        ));
    }

    #[test]
    fn it_ignores_other_messages() {
        assert!(!OrderUpdates::requests_design_preview(
            "El diseño lleva flores azules"
        ));
    }
}

mod apply {
    use super::*;

    #[test]
    fn it_sets_portions_and_price() {
        let mut order = Order::default();
        OrderUpdates::apply(&mut order, "Quiero 12 porciones");

        assert_eq!(order.portions, Some(12));
        assert_eq!(order.price, Some(30 + 12 * 5 + 20));
        assert_eq!(order.flavor, None);
    }

    #[test]
    fn it_leaves_the_order_unchanged_on_unparseable_portions() {
        let mut order = Order {
            portions: Some(8),
            price: Some(90),
            ..Order::default()
        };
        OrderUpdates::apply(&mut order, "Quiero muchas porciones");

        assert_eq!(order.portions, Some(8));
        assert_eq!(order.price, Some(90));
    }

    #[test]
    fn it_updates_flavor_and_portions_together() {
        let mut order = Order::default();
        OrderUpdates::apply(&mut order, "Quiero un pastel de chocolate para 20 porciones");

        assert_eq!(order.flavor, Some(Flavor::Chocolate));
        assert_eq!(order.portions, Some(20));
        assert_eq!(order.price, Some(30 + 20 * 5 + 20));
    }

    #[test]
    fn it_never_touches_design_or_delivery_date() {
        let mut order = Order::default();
        OrderUpdates::apply(
            &mut order,
            "Un pastel con flores para el 20 de marzo, 10 porciones",
        );

        assert_eq!(order.design, None);
        assert_eq!(order.delivery_date, None);
    }
}
