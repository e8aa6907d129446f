//! Integration tests for basket flash message generation.
//!
//! Covers the snapshot diff (lost offers warn, gained offers cheer, stable
//! offers stay silent), message ordering, and the side-effecting
//! `apply_changes` flow end to end against the storefront fixture set.

use rusty_money::{Money, iso::GBP};
use slotmap::SlotMap;
use testresult::TestResult;

use wicker::prelude::*;

fn offer(keys: &mut SlotMap<OfferKey, ()>, name: &str) -> Offer<'static> {
    Offer::new(
        keys.insert(()),
        name,
        false,
        Benefit::FixedDiscount(Money::from_minor(100, GBP)),
    )
}

#[test]
fn only_changed_offers_are_reported() -> TestResult {
    let mut keys = SlotMap::with_key();
    let offer_a = offer(&mut keys, "Offer A");
    let offer_b = offer(&mut keys, "Offer B");
    let offer_c = offer(&mut keys, "Offer C");

    let before: OfferSet<'_> = [offer_a, offer_b.clone()].into_iter().collect();
    let after: OfferSet<'_> = [offer_b, offer_c].into_iter().collect();

    let generator = BasketMessageGenerator::text();

    let lost = generator.offer_lost_messages(&before, &after)?;
    let gained = generator.offer_gained_messages(&before, &after)?;

    assert_eq!(lost.len(), 1);
    assert!(lost[0].text.contains("Offer A"));

    assert_eq!(gained.len(), 1);
    assert!(gained[0].text.contains("Offer C"));

    for message in lost.iter().chain(gained.iter()) {
        assert!(
            !message.text.contains("Offer B"),
            "unchanged offer leaked into: {}",
            message.text
        );
    }

    Ok(())
}

#[test]
fn messages_are_ordered_lost_gained_then_total() -> TestResult {
    let mut keys = SlotMap::with_key();
    let lost_one = offer(&mut keys, "Lost one");
    let lost_two = offer(&mut keys, "Lost two");
    let gained_one = offer(&mut keys, "Gained one");

    let before: OfferSet<'_> = [lost_one, lost_two].into_iter().collect();
    let after: OfferSet<'_> = [gained_one].into_iter().collect();

    let basket = Basket::with_lines(
        [Line::new(
            ProductKey::default(),
            1,
            Money::from_minor(1000, GBP),
        )],
        GBP,
    )?;

    let generator = BasketMessageGenerator::text();
    let messages = generator.messages(&basket, &before, &after, true)?;

    // two lost + one gained + the new total
    assert_eq!(messages.len(), 4);

    let severities: Vec<Severity> = messages.iter().map(|m| m.severity).collect();

    assert_eq!(
        severities,
        [
            Severity::Warning,
            Severity::Warning,
            Severity::Success,
            Severity::Info
        ]
    );

    Ok(())
}

#[test]
fn growing_the_basket_announces_newly_gained_offers() -> TestResult {
    let fixture = Fixture::from_set("storefront")?;
    let applicator = fixture.applicator();

    // Coffee and croissants only: £16.20, below the Big Spender threshold.
    let mut basket = fixture.basket(Some(2))?;

    applicator.apply(&mut basket)?;

    let before = basket.applied_offers();

    assert_eq!(before.len(), 1);

    let mut session = Session::new(basket, FlashQueue::new());

    // Adding the hamper pushes the subtotal to £41.20.
    let hamper = fixture
        .lines()
        .get(2)
        .cloned()
        .expect("storefront fixture has a hamper line");

    session.basket.add_line(hamper)?;

    let generator = BasketMessageGenerator::text();

    generator.apply_changes(&mut session, &applicator, &before, true)?;

    let messages = session.messages.messages();

    assert_eq!(messages.len(), 2);

    assert_eq!(messages[0].severity, Severity::Success);
    assert!(messages[0].text.contains("Big Spender"));

    assert_eq!(messages[1].severity, Severity::Info);
    assert!(
        messages[1].text.contains("£32.08"),
        "unexpected total in: {}",
        messages[1].text
    );
    assert!(messages[1].text.contains("Checkout now"));

    Ok(())
}

#[test]
fn shrinking_the_basket_warns_about_lost_offers() -> TestResult {
    let fixture = Fixture::from_set("storefront")?;
    let applicator = fixture.applicator();

    let mut basket = fixture.basket(None)?;

    applicator.apply(&mut basket)?;

    let before = basket.applied_offers();

    assert_eq!(before.len(), 2);

    // The customer removes the hamper, dropping below the threshold.
    let mut session = Session::new(fixture.basket(Some(2))?, FlashQueue::new());

    let generator = BasketMessageGenerator::text();

    generator.apply_changes(&mut session, &applicator, &before, false)?;

    let messages = session.messages.messages();

    assert_eq!(messages.len(), 2);

    assert_eq!(messages[0].severity, Severity::Warning);
    assert!(messages[0].text.contains("Big Spender"));

    assert_eq!(messages[1].severity, Severity::Info);
    assert!(
        messages[1].text.contains("£14.58"),
        "unexpected total in: {}",
        messages[1].text
    );
    assert!(!messages[1].text.contains("Checkout now"));

    Ok(())
}

#[test]
fn enqueued_messages_are_tagged_safe_with_no_icon() -> TestResult {
    let fixture = Fixture::from_set("storefront")?;
    let applicator = fixture.applicator();

    let mut session = Session::new(fixture.basket(None)?, FlashQueue::new());

    let generator = BasketMessageGenerator::text();

    generator.apply_changes(&mut session, &applicator, &OfferSet::new(), true)?;

    assert!(!session.messages.is_empty());

    for message in session.messages.messages() {
        assert_eq!(message.tags, MessageTags::safe_no_icon());
    }

    Ok(())
}

#[test]
fn stable_offers_produce_only_the_new_total() -> TestResult {
    let fixture = Fixture::from_set("storefront")?;
    let applicator = fixture.applicator();

    let mut basket = fixture.basket(None)?;

    applicator.apply(&mut basket)?;

    let before = basket.applied_offers();

    let mut session = Session::new(basket, FlashQueue::new());

    let generator = BasketMessageGenerator::text();

    generator.apply_changes(&mut session, &applicator, &before, true)?;

    let messages = session.messages.messages();

    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].severity, Severity::Info);

    Ok(())
}
