use super::DisplayBuffer;
use crate::keys::Key;
use crate::parser::{CalcError, ErrorKind};

fn typed(keys: &str) -> DisplayBuffer {
    let mut buffer = DisplayBuffer::new();
    for c in keys.chars() {
        buffer.append(c).unwrap();
    }
    buffer
}

#[test]
fn starts_at_placeholder() {
    let buffer = DisplayBuffer::new();
    assert_eq!(buffer.text(), "0");
    assert!(buffer.is_placeholder());
    assert_eq!(buffer.last_result(), None);
}

#[test]
fn append_from_placeholder() {
    let tests = vec![
        ('7', "7"),
        ('0', "0"),
        ('.', "0."),
        ('+', "0+"),
        ('-', "0-"),
        ('*', "0*"),
        ('/', "0/"),
        ('×', "0*"),
        ('÷', "0/"),
        ('(', "0("),
        (')', "0"),
    ];

    for (token, expected) in tests.into_iter() {
        let mut buffer = DisplayBuffer::new();
        buffer.append(token).unwrap();
        assert_eq!(buffer.text(), expected, "appending {:?}", token);
    }
}

#[test]
fn append_does_not_check_syntax() {
    assert_eq!(typed("3++)(").text(), "3++)(");
    assert_eq!(typed("12)").text(), "12)");
}

#[test]
fn append_rejects_foreign_characters() {
    let mut buffer = typed("12");
    assert_eq!(
        buffer.append('x'),
        Err(CalcError::InvalidCharacter {
            character: 'x',
            position: 2,
        })
    );
    assert_eq!(buffer.text(), "12");

    buffer.append(' ').unwrap();
    assert_eq!(buffer.text(), "12");
}

#[test]
fn backspace() {
    let mut buffer = typed("12+");
    buffer.backspace();
    assert_eq!(buffer.text(), "12");
    buffer.backspace();
    buffer.backspace();
    assert_eq!(buffer.text(), "0");
    buffer.backspace();
    assert_eq!(buffer.text(), "0");
}

#[test]
fn clear() {
    let mut buffer = typed("(1+2");
    buffer.clear();
    assert_eq!(buffer.text(), "0");
    assert!(buffer.is_placeholder());
}

#[test]
fn evaluate_replaces_text_with_result() {
    let mut buffer = DisplayBuffer::new();
    buffer.clear();
    buffer.append('7').unwrap();
    buffer.append('+').unwrap();
    buffer.append('3').unwrap();

    assert_eq!(buffer.evaluate().map(f64::from), Ok(10.0));
    assert_eq!(buffer.text(), "10");
    assert_eq!(buffer.last_result().map(f64::from), Some(10.0));
}

#[test]
fn evaluate_twice_is_stable() {
    let mut buffer = typed("7÷2");
    let first = buffer.evaluate();
    assert_eq!(buffer.text(), "3.5");
    assert_eq!(buffer.evaluate(), first);
    assert_eq!(buffer.text(), "3.5");

    let mut negative = typed("2-9");
    negative.evaluate().unwrap();
    assert_eq!(negative.text(), "-7");
    negative.evaluate().unwrap();
    assert_eq!(negative.text(), "-7");
}

#[test]
fn results_keep_composing() {
    let mut buffer = typed("6/3");
    buffer.evaluate().unwrap();
    buffer.append('*').unwrap();
    buffer.append('4').unwrap();
    assert_eq!(buffer.text(), "2*4");
    assert_eq!(buffer.evaluate().map(f64::from), Ok(8.0));
}

#[test]
fn failed_evaluation_shows_marker() {
    let mut buffer = typed("5");
    buffer.evaluate().unwrap();

    let mut failing = typed("5/0");
    failing.last_result = buffer.last_result();
    assert_eq!(
        failing.evaluate().map_err(|e| e.kind()),
        Err(ErrorKind::DivisionByZero)
    );
    assert_eq!(failing.text(), "Error");
    assert_eq!(failing.last_result().map(f64::from), Some(5.0));
    assert!(!failing.is_placeholder());

    // Still the same error; nothing to re-evaluate.
    assert_eq!(failing.evaluate(), Err(CalcError::DivisionByZero));
    assert_eq!(failing.text(), "Error");
}

#[test]
fn edits_after_error_start_fresh() {
    let mut buffer = typed("2+");
    assert_eq!(
        buffer.evaluate().map_err(|e| e.kind()),
        Err(ErrorKind::SyntaxError)
    );
    buffer.append('4').unwrap();
    assert_eq!(buffer.text(), "4");

    let mut buffer = typed("(1+2");
    buffer.evaluate().unwrap_err();
    buffer.append('-').unwrap();
    assert_eq!(buffer.text(), "0-");

    let mut buffer = typed("1//2");
    buffer.evaluate().unwrap_err();
    buffer.backspace();
    assert_eq!(buffer.text(), "0");
    assert!(buffer.error().is_none());
}

#[test]
fn custom_error_marker() {
    let mut buffer = DisplayBuffer::with_error_marker("Overengineered Error");
    buffer.append(')').unwrap();
    buffer.append('(').unwrap();
    buffer.append(')').unwrap();
    assert_eq!(buffer.text(), "0()");
    buffer.evaluate().unwrap_err();
    assert_eq!(buffer.text(), "Overengineered Error");
}

#[test]
fn press_dispatches_keys() {
    let mut buffer = DisplayBuffer::new();
    for label in &["1", "2", "×", "3", "←", "4", "="] {
        let key = Key::from_label(label).unwrap();
        buffer.press(key).unwrap();
    }
    assert_eq!(buffer.text(), "48");

    buffer.press(Key::Clear).unwrap();
    assert_eq!(buffer.text(), "0");

    buffer.press(Key::Token('/')).unwrap();
    assert_eq!(buffer.text(), "0/");
    assert!(buffer.press(Key::Evaluate).is_err());
    assert_eq!(buffer.text(), "Error");
}

#[test]
fn overflow_shows_marker() {
    let big = format!("1{}", "0".repeat(300));
    let mut buffer = typed(&format!("{}*{}", big, big));
    assert_eq!(
        buffer.evaluate().map_err(|e| e.kind()),
        Err(ErrorKind::Overflow)
    );
    assert_eq!(buffer.text(), "Error");
}
