//! Tests for the message model

use closuretalk_core::message::{FINAL, INFO, SET_SELF, TYPE};
use closuretalk_core::{msg, ClassBuilder, Message, Value};

#[test]
fn test_message_macro() {
    assert_eq!(msg!("getx"), Message::new("getx", vec![]));
    assert_eq!(msg!(TYPE), Message::Type);
    assert_eq!(msg!(FINAL), Message::IsFinal);
    assert_eq!(msg!(INFO), Message::Info);

    let msg = msg!("scale", 2, 0.5);
    assert_eq!(msg.selector(), "scale");
    assert_eq!(msg.args(), &[Value::from(2), Value::from(0.5)]);
}

#[test]
fn test_set_self_message_carries_the_outer_instance() {
    let outer = ClassBuilder::new("outer").build();
    let msg = msg!(SET_SELF, &outer);

    assert_eq!(msg, Message::SetSelf(Value::from(&outer)));
    assert_eq!(msg.selector(), SET_SELF);
    assert_eq!(msg.arg_count(), 1);
}

#[test]
fn test_message_parsing() {
    assert_eq!(
        Message::parse("getx").unwrap(),
        Message::Send {
            selector: "getx".to_string(),
            args: vec![]
        }
    );
    assert_eq!(Message::parse("type").unwrap(), Message::Type);
    assert_eq!(Message::parse("info").unwrap(), Message::Info);

    let msg = Message::parse("paint \"red\" #glossy true nil 1.5").unwrap();
    assert_eq!(
        msg.args(),
        &[
            Value::from("red"),
            Value::Symbol("glossy".to_string()),
            Value::from(true),
            Value::Nil,
            Value::from(1.5),
        ]
    );

    assert!(Message::parse("").is_err());
    assert!(Message::parse("set-self! me").is_err());
}

#[test]
fn test_message_display() {
    assert_eq!(Message::Type.to_string(), "type");
    assert_eq!(Message::IsFinal.to_string(), "final?");
    assert_eq!(msg!("move-by", 1, 2).to_string(), "move-by 1 2");
    assert_eq!(msg!("rename", "bob").to_string(), "rename bob");
}
