use dioxus::prelude::*;

use super::FieldError;

#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub enum InputType {
    #[default]
    Text,
    Email,
    Password,
    Number,
    Url,
    DateTime,
}

impl InputType {
    fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
            Self::Number => "number",
            Self::Url => "url",
            Self::DateTime => "datetime-local",
        }
    }
}

const FIELD_CLASS: &str = "w-full rounded-lg bg-white text-gray-900 px-4 py-2.5 text-sm border placeholder-gray-400 transition-colors duration-200 focus:outline-none focus:ring-2 focus:ring-indigo-500/40";

fn field_class(invalid: bool, extra: Option<String>) -> String {
    let border = if invalid {
        "border-red-400 focus:border-red-500"
    } else {
        "border-gray-300 focus:border-indigo-500"
    };
    match extra {
        Some(extra) if !extra.is_empty() => format!("{} {} {}", FIELD_CLASS, border, extra),
        _ => format!("{} {}", FIELD_CLASS, border),
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct TextInputProps {
    #[props(optional)]
    pub class: Option<String>,
    #[props(optional)]
    pub name: Option<String>,
    #[props(optional)]
    pub label: Option<String>,
    pub value: String,
    pub oninput: EventHandler<FormEvent>,
    #[props(optional)]
    pub onblur: Option<EventHandler<FocusEvent>>,
    #[props(optional)]
    pub placeholder: Option<String>,
    #[props(optional)]
    pub input_type: Option<InputType>,
    #[props(optional)]
    pub error: Option<String>,
    #[props(optional)]
    pub disabled: Option<bool>,
}

#[component]
pub fn TextInput(props: TextInputProps) -> Element {
    let name = props.name.unwrap_or_default();
    let invalid = props.error.is_some();
    let class = field_class(invalid, props.class);

    rsx! {
        div { class: "space-y-1",
            if let Some(label) = &props.label {
                label { class: "block text-sm font-medium text-gray-700", r#for: "{name}", "{label}" }
            }
            input {
                class,
                id: "{name}",
                name: "{name}",
                r#type: props.input_type.unwrap_or_default().as_str(),
                value: "{props.value}",
                placeholder: props.placeholder.unwrap_or_default(),
                disabled: props.disabled.unwrap_or(false),
                aria_invalid: invalid,
                oninput: move |e| props.oninput.call(e),
                onblur: move |e| {
                    if let Some(handler) = &props.onblur {
                        handler.call(e);
                    }
                },
            }
            FieldError { message: props.error }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct TextAreaProps {
    #[props(optional)]
    pub name: Option<String>,
    #[props(optional)]
    pub label: Option<String>,
    pub value: String,
    pub oninput: EventHandler<FormEvent>,
    #[props(optional)]
    pub onblur: Option<EventHandler<FocusEvent>>,
    #[props(optional)]
    pub placeholder: Option<String>,
    #[props(optional)]
    pub rows: Option<u32>,
    #[props(optional)]
    pub error: Option<String>,
}

#[component]
pub fn TextArea(props: TextAreaProps) -> Element {
    let name = props.name.unwrap_or_default();
    let class = field_class(props.error.is_some(), None);

    rsx! {
        div { class: "space-y-1",
            if let Some(label) = &props.label {
                label { class: "block text-sm font-medium text-gray-700", r#for: "{name}", "{label}" }
            }
            textarea {
                class,
                id: "{name}",
                name: "{name}",
                rows: props.rows.unwrap_or(4),
                value: "{props.value}",
                placeholder: props.placeholder.unwrap_or_default(),
                oninput: move |e| props.oninput.call(e),
                onblur: move |e| {
                    if let Some(handler) = &props.onblur {
                        handler.call(e);
                    }
                },
            }
            FieldError { message: props.error }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct SelectProps {
    #[props(optional)]
    pub name: Option<String>,
    #[props(optional)]
    pub label: Option<String>,
    pub value: String,
    /// `(value, label)` pairs.
    pub options: Vec<(String, String)>,
    #[props(optional)]
    pub placeholder: Option<String>,
    pub onchange: EventHandler<FormEvent>,
    #[props(optional)]
    pub onblur: Option<EventHandler<FocusEvent>>,
    #[props(optional)]
    pub error: Option<String>,
}

#[component]
pub fn Select(props: SelectProps) -> Element {
    let name = props.name.unwrap_or_default();
    let class = field_class(props.error.is_some(), None);

    rsx! {
        div { class: "space-y-1",
            if let Some(label) = &props.label {
                label { class: "block text-sm font-medium text-gray-700", r#for: "{name}", "{label}" }
            }
            select {
                class,
                id: "{name}",
                name: "{name}",
                value: "{props.value}",
                onchange: move |e| props.onchange.call(e),
                onblur: move |e| {
                    if let Some(handler) = &props.onblur {
                        handler.call(e);
                    }
                },
                if let Some(placeholder) = &props.placeholder {
                    option { value: "", "{placeholder}" }
                }
                for (value, text) in props.options.iter() {
                    option {
                        key: "{value}",
                        value: "{value}",
                        selected: *value == props.value,
                        "{text}"
                    }
                }
            }
            FieldError { message: props.error }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct CheckboxProps {
    #[props(optional)]
    pub name: Option<String>,
    pub label: String,
    pub checked: bool,
    pub onchange: EventHandler<FormEvent>,
}

#[component]
pub fn Checkbox(props: CheckboxProps) -> Element {
    let name = props.name.unwrap_or_default();
    rsx! {
        label { class: "inline-flex items-center gap-2 text-sm text-gray-700 cursor-pointer",
            input {
                class: "h-4 w-4 rounded border-gray-300 text-indigo-600 focus:ring-indigo-500",
                r#type: "checkbox",
                id: "{name}",
                name: "{name}",
                checked: props.checked,
                onchange: move |e| props.onchange.call(e),
            }
            "{props.label}"
        }
    }
}
