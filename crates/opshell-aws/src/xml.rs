//! EC2 XML responses to JSON.
//!
//! EC2 answers with documents such as
//! ```xml
//! <GetIpamDiscoveredAccountsResponse xmlns="http://ec2.amazonaws.com/doc/2016-11-15/">
//!   <requestId>r-1</requestId>
//!   <ipamDiscoveredAccountSet>
//!     <item><accountId>111122223333</accountId></item>
//!   </ipamDiscoveredAccountSet>
//!   <nextToken>abc</nextToken>
//! </GetIpamDiscoveredAccountsResponse>
//! ```
//! Elements whose children are all `<item>` become arrays, other elements
//! with children become objects and leaves become strings. The root element
//! itself is dropped.

use quick_xml::events::Event;
use quick_xml::Reader;
use serde_json::{Map, Value};

struct Frame {
    name: String,
    children: Vec<(String, Value)>,
    text: String,
}

impl Frame {
    fn new(name: String) -> Self {
        Self {
            name,
            children: Vec::new(),
            text: String::new(),
        }
    }

    fn into_value(self) -> Value {
        if self.children.is_empty() {
            let text = self.text.trim();
            return if text.is_empty() {
                empty_value(&self.name)
            } else {
                Value::String(text.to_string())
            };
        }

        if self.children.iter().all(|(n, _)| n == "item" || n == "member") {
            return Value::Array(self.children.into_iter().map(|(_, v)| v).collect());
        }

        let mut obj = Map::new();
        for (name, value) in self.children {
            match obj.get_mut(&name) {
                Some(Value::Array(existing)) => existing.push(value),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
                None => {
                    obj.insert(name, value);
                }
            }
        }
        Value::Object(obj)
    }
}

/// `<fooSet/>` is an empty list, other empty elements are empty strings.
fn empty_value(name: &str) -> Value {
    if name.ends_with("Set") {
        Value::Array(Vec::new())
    } else {
        Value::String(String::new())
    }
}

/// Decode `xml` into the JSON value of its root element's content.
pub fn xml_to_json(xml: &str) -> Result<Value, String> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<Value> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                stack.push(Frame::new(name));
            }
            Ok(Event::Empty(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                let value = empty_value(&name);
                match stack.last_mut() {
                    Some(parent) => parent.children.push((name, value)),
                    None => root = Some(Value::Object(Map::new())),
                }
            }
            Ok(Event::Text(t)) => {
                let text = t.unescape().map_err(|e| format!("invalid XML text: {}", e))?;
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&text);
                }
            }
            Ok(Event::CData(c)) => {
                let text = String::from_utf8_lossy(&c.into_inner()).into_owned();
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&text);
                }
            }
            Ok(Event::End(_)) => {
                let Some(frame) = stack.pop() else {
                    return Err("unbalanced closing tag".to_string());
                };
                let name = frame.name.clone();
                let value = frame.into_value();
                match stack.last_mut() {
                    Some(parent) => parent.children.push((name, value)),
                    None => root = Some(value),
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(format!(
                    "XML parse error at position {}: {}",
                    reader.buffer_position(),
                    e
                ))
            }
        }
    }

    if !stack.is_empty() {
        return Err("unexpected end of XML document".to_string());
    }
    match root {
        Some(Value::Object(obj)) => Ok(Value::Object(obj)),
        Some(Value::String(s)) if s.is_empty() => Ok(Value::Object(Map::new())),
        Some(other) => Ok(other),
        None => Err("empty XML document".to_string()),
    }
}
