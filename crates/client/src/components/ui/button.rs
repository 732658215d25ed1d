use dioxus::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Danger,
    Ghost,
}

impl ButtonVariant {
    fn class(self) -> &'static str {
        match self {
            Self::Primary => "bg-indigo-600 text-white hover:bg-indigo-500 focus:ring-indigo-500",
            Self::Secondary => "bg-white text-gray-700 border border-gray-300 hover:bg-gray-50 focus:ring-gray-400",
            Self::Danger => "bg-red-600 text-white hover:bg-red-500 focus:ring-red-500",
            Self::Ghost => "bg-transparent text-gray-600 hover:bg-gray-100 hover:text-gray-900 focus:ring-gray-400",
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct ButtonProps {
    #[props(optional)]
    pub class: Option<String>,
    #[props(optional)]
    pub variant: Option<ButtonVariant>,
    #[props(optional)]
    pub r#type: Option<String>,
    #[props(optional)]
    pub disabled: Option<bool>,
    /// Shows a spinner and disables the button.
    #[props(optional)]
    pub loading: Option<bool>,
    #[props(optional)]
    pub onclick: Option<EventHandler<MouseEvent>>,
    pub children: Element,
}

#[component]
pub fn Button(props: ButtonProps) -> Element {
    let variant = props.variant.unwrap_or_default();
    let loading = props.loading.unwrap_or(false);
    let disabled = props.disabled.unwrap_or(false) || loading;

    let base = "inline-flex items-center justify-center gap-2 rounded-lg px-4 py-2 text-sm font-semibold transition-colors duration-200 focus:outline-none focus:ring-2 focus:ring-offset-2 disabled:opacity-50 disabled:pointer-events-none";

    let class = match props.class {
        Some(extra) if !extra.is_empty() => format!("{} {} {}", base, variant.class(), extra),
        _ => format!("{} {}", base, variant.class()),
    };

    rsx! {
        button {
            class,
            r#type: props.r#type.unwrap_or_else(|| "button".to_string()),
            disabled,
            onclick: move |evt| {
                if disabled {
                    return;
                }
                if let Some(handler) = &props.onclick {
                    handler.call(evt);
                }
            },
            if loading {
                super::Spinner { small: true }
            }
            {props.children}
        }
    }
}
