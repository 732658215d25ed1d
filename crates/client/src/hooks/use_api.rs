use dioxus::prelude::*;
use eventnow_core::{ApiClient, ApiRequest, RequestState};
use serde::de::DeserializeOwned;

use super::SignalCell;

pub type UseApi<T> = ApiRequest<T, SignalCell<RequestState<T>>>;

/// One request lifecycle per component. Anything still in flight when the
/// component unmounts is aborted without writing state.
pub fn use_api<T>() -> UseApi<T>
where
    T: Clone + DeserializeOwned + 'static,
{
    let api = use_context::<ApiClient>();
    let state = use_signal(RequestState::<T>::default);
    let request = use_hook(|| ApiRequest::new(api, SignalCell(state)));

    let on_drop = request.clone();
    use_drop(move || {
        on_drop.detach();
    });

    request
}
