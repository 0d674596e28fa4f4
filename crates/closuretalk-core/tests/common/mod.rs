//! Shared fixtures: a point, a color, a color-point that is both,
//! and a final label class nobody may inherit from.

#![allow(dead_code)]

use closuretalk_core::message::INFO;
use closuretalk_core::{
    new_instance, try_send, ClassBuilder, Instance, ObjectError, SelfCell, Supers, Value,
};
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

fn int_arg(args: &[Value], index: usize, selector: &str) -> Result<i64, ObjectError> {
    args.get(index)
        .and_then(Value::as_i64)
        .ok_or_else(|| ObjectError::bad_args(selector, format!("argument {index} must be a number")))
}

fn str_arg(args: &[Value], index: usize, selector: &str) -> Result<String, ObjectError> {
    args.get(index)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ObjectError::bad_args(selector, format!("argument {index} must be a string")))
}

fn coord(receiver: &Value, selector: &str) -> Result<i64, ObjectError> {
    try_send(receiver, selector, &[])?
        .as_i64()
        .ok_or_else(|| ObjectError::bad_args(selector, "coordinate is not a number"))
}

fn coord_of_self(me: &SelfCell, selector: &str) -> Result<i64, ObjectError> {
    coord(&me.value(), selector)
}

pub fn point(x: i64, y: i64) -> Instance {
    let class = ClassBuilder::new("point");
    let me = class.self_cell();
    class
        .method("getx", move |_| Ok(Value::from(x)))
        .method("gety", move |_| Ok(Value::from(y)))
        .method(INFO, move |_| Ok(Value::from(format!("point x={x} y={y}"))))
        .method("add", move |args| {
            let other = args
                .first()
                .ok_or_else(|| ObjectError::bad_args("add", "expected a point"))?;
            let sum_x = coord_of_self(&me, "getx")? + coord(other, "getx")?;
            let sum_y = coord_of_self(&me, "gety")? + coord(other, "gety")?;
            new_instance(point_class, &[sum_x.into(), sum_y.into()]).map(Value::from)
        })
        .build()
}

pub fn point_class(args: &[Value]) -> Result<Instance, ObjectError> {
    Ok(point(int_arg(args, 0, "point")?, int_arg(args, 1, "point")?))
}

pub fn color(name: &str) -> Instance {
    let name = name.to_string();
    let info = format!("color {name}");
    ClassBuilder::new("color")
        .method("get-color", move |_| Ok(Value::from(name.as_str())))
        .method(INFO, move |_| Ok(Value::from(info.as_str())))
        .build()
}

pub fn color_class(args: &[Value]) -> Result<Instance, ObjectError> {
    Ok(color(&str_arg(args, 0, "color")?))
}

pub fn color_point(x: i64, y: i64, name: &str) -> Instance {
    let info = format!("color-point x={x} y={y} color={name}");
    let class = ClassBuilder::new("color-point")
        .inherits(Supers::build([point(x, y), color(name)]));
    let me = class.self_cell();
    class
        .method(INFO, move |_| Ok(Value::from(info.as_str())))
        .method("add", move |args| {
            let other = args
                .first()
                .ok_or_else(|| ObjectError::bad_args("add", "expected a point"))?;
            let sum_x = coord_of_self(&me, "getx")? + coord(other, "getx")?;
            let sum_y = coord_of_self(&me, "gety")? + coord(other, "gety")?;
            let color = me.send("get-color", &[])?;
            new_instance(color_point_class, &[sum_x.into(), sum_y.into(), color]).map(Value::from)
        })
        .build()
}

pub fn color_point_class(args: &[Value]) -> Result<Instance, ObjectError> {
    Ok(color_point(
        int_arg(args, 0, "color-point")?,
        int_arg(args, 1, "color-point")?,
        &str_arg(args, 2, "color-point")?,
    ))
}

/// A final class
pub fn label(text: &str) -> Instance {
    let text = text.to_string();
    let info = format!("label text={text}");
    ClassBuilder::new("label")
        .final_class()
        .method("get-text", move |_| Ok(Value::from(text.as_str())))
        .method(INFO, move |_| Ok(Value::from(info.as_str())))
        .build()
}

/// A point that tries to inherit from a label too
pub fn labeled_point(text: &str, x: i64, y: i64) -> Instance {
    ClassBuilder::new("labeled-point")
        .inherits(Supers::build([label(text), point(x, y)]))
        .build()
}

pub fn obj(instance: Instance) -> Value {
    Value::from(instance)
}

/// In-memory sink for a fmt subscriber
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with a subscriber that records everything it logs
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer.contents())
}
