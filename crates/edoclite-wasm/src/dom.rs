//! Live-document host: reads controls and writes message rows through `web-sys`.

use edoclite_validation::{FieldEvent, FieldPattern, FieldValidator, FormHost, HandlerBinder, HostError};
use js_sys::{Array, Reflect, RegExp};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
    Node, RadioNodeList,
};

/// A named entry of a form: one control, or every control sharing the name
pub enum Control {
    Single(Element),
    Group(RadioNodeList),
}

impl Control {
    /// Current value; for a group, the value of the checked member
    pub fn value(&self) -> Option<String> {
        match self {
            Control::Single(element) => element_value(element),
            Control::Group(list) => Some(list.value()),
        }
    }

    /// Nodes that raise change and blur events
    pub fn targets(&self) -> Vec<EventTarget> {
        match self {
            Control::Single(element) => vec![element.clone().into()],
            Control::Group(list) => (0..list.length())
                .filter_map(|i| list.item(i))
                .map(EventTarget::from)
                .collect(),
        }
    }
}

fn element_value(element: &Element) -> Option<String> {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        Some(input.value())
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        Some(select.value())
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        Some(area.value())
    } else {
        element.get_attribute("value")
    }
}

fn js_error_message(error: &JsValue) -> String {
    error
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| error.as_string())
        .unwrap_or_else(|| format!("{:?}", error))
}

/// Compile a pattern with the page's own `RegExp`, catching syntax errors
fn compile_regexp(source: &str) -> Result<RegExp, String> {
    let constructor = RegExp::new("", "").constructor();
    let args = Array::of1(&JsValue::from_str(source));
    Reflect::construct(&constructor, &args)
        .map_err(|e| js_error_message(&e))?
        .dyn_into::<RegExp>()
        .map_err(|_| "RegExp constructor returned a non-RegExp".to_string())
}

/// The page's document, as seen by the validator
pub struct DomHost {
    document: Document,
}

impl DomHost {
    pub fn current() -> Result<Self, HostError> {
        web_sys::window()
            .and_then(|window| window.document())
            .map(|document| Self { document })
            .ok_or_else(|| HostError::Host("no document available".to_string()))
    }

    /// Named entry of the form container, looked up as `form[name]`
    pub fn control(&self, form_id: &str, name: &str) -> Option<Control> {
        let form = self.document.get_element_by_id(form_id)?;
        let entry = Reflect::get(&form, &JsValue::from_str(name)).ok()?;

        if let Some(list) = entry.dyn_ref::<RadioNodeList>() {
            return Some(Control::Group(list.clone()));
        }
        entry.dyn_into::<Element>().ok().map(Control::Single)
    }

    fn element(&self, id: &str) -> Result<Element, HostError> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| HostError::ElementNotFound { id: id.to_string() })
    }
}

impl FormHost for DomHost {
    fn control_value(&self, form_id: &str, name: &str) -> Option<String> {
        self.control(form_id, name).and_then(|control| control.value())
    }

    fn set_text(&self, id: &str, text: &str) -> Result<(), HostError> {
        self.element(id)?.set_text_content(Some(text));
        Ok(())
    }

    fn set_class(&self, id: &str, class: &str) -> Result<(), HostError> {
        self.element(id)?.set_class_name(class);
        Ok(())
    }

    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            // nothing useful to do if the dialog is blocked
            let _ = window.alert_with_message(message);
        }
    }

    fn matches(&self, pattern: &FieldPattern, value: &str) -> Result<bool, String> {
        Ok(compile_regexp(pattern.source())?.test(value))
    }
}

/// A change or blur event raised by a form control
pub struct DomEvent<'a>(pub &'a Event);

impl FieldEvent for DomEvent<'_> {
    fn origin_control(&self) -> Option<String> {
        let target = self.0.target()?;
        let node = target.dyn_into::<Node>().ok()?;

        // Some engines report the text node inside the control
        let element = if node.node_type() == Node::TEXT_NODE {
            node.parent_element()?
        } else {
            node.dyn_into::<Element>().ok()?
        };

        element.get_attribute("name")
    }
}

/// Binds change and blur listeners that route events into a validator
pub struct DomBinder {
    host: Rc<DomHost>,
    validator: Rc<FieldValidator>,
}

impl DomBinder {
    pub fn new(host: Rc<DomHost>, validator: Rc<FieldValidator>) -> Self {
        Self { host, validator }
    }
}

impl HandlerBinder for DomBinder {
    fn bind(&self, form_id: &str, name: &str) -> Result<(), HostError> {
        let control = self
            .host
            .control(form_id, name)
            .ok_or_else(|| HostError::ControlNotFound {
                form_id: form_id.to_string(),
                name: name.to_string(),
            })?;

        let host = Rc::clone(&self.host);
        let validator = Rc::clone(&self.validator);
        let handler = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            validator.validate(host.as_ref(), &DomEvent(&event));
        });

        for target in control.targets() {
            for kind in ["change", "blur"] {
                target
                    .add_event_listener_with_callback(kind, handler.as_ref().unchecked_ref())
                    .map_err(|e| HostError::Host(js_error_message(&e)))?;
            }
        }

        // listeners live as long as the page
        handler.forget();
        Ok(())
    }
}
