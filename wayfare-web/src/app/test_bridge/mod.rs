#[cfg(any(test, target_arch = "wasm32"))]
mod shared;
#[cfg(not(target_arch = "wasm32"))]
mod stub;
#[cfg(target_arch = "wasm32")]
mod wasm;

use crate::app::state::WizardHandle;
use yew::prelude::*;

#[cfg(not(target_arch = "wasm32"))]
#[hook]
pub fn use_test_bridge(handle: &WizardHandle) {
    stub::use_test_bridge(handle);
}

#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_test_bridge(handle: &WizardHandle) {
    wasm::use_test_bridge(handle);
}
