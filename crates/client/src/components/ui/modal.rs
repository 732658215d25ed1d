use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ModalProps {
    pub title: String,
    #[props(optional)]
    pub subtitle: Option<String>,
    pub on_close: EventHandler<()>,
    pub children: Element,
    /// Footer buttons; omitted when `None`.
    #[props(optional)]
    pub footer: Option<Element>,
}

#[component]
pub fn Modal(props: ModalProps) -> Element {
    rsx! {
        div {
            class: "fixed inset-0 bg-black/50 flex items-center justify-center z-40",
            onclick: move |_| props.on_close.call(()),
            div {
                class: "bg-white rounded-lg shadow-2xl w-full max-w-md mx-4",
                role: "dialog",
                aria_modal: "true",
                onclick: move |evt| evt.stop_propagation(),
                div { class: "px-6 py-4 border-b border-gray-200",
                    h3 { class: "text-lg font-bold text-gray-900", "{props.title}" }
                    if let Some(sub) = &props.subtitle {
                        p { class: "text-sm text-gray-500 mt-1", "{sub}" }
                    }
                }
                div { class: "p-6", {props.children} }
                if let Some(footer) = props.footer {
                    div { class: "px-6 py-4 border-t border-gray-200 flex justify-end gap-3",
                        {footer}
                    }
                }
            }
        }
    }
}
