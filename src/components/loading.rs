//! Loading Component
//!
//! Loading spinner and skeleton states.

use leptos::*;

/// Full-width loading spinner
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-12">
            <div class="inline-block animate-spin rounded-full h-10 w-10 border-t-2 border-b-2 border-primary-600" />
        </div>
    }
}

/// Skeleton loader for post cards
#[component]
pub fn CardSkeleton() -> impl IntoView {
    view! {
        <div class="bg-white rounded-lg shadow-md p-6 mb-4 animate-pulse">
            <div class="flex items-center space-x-3 mb-4">
                <div class="w-10 h-10 bg-gray-200 rounded-full" />
                <div class="h-4 bg-gray-200 rounded w-1/4" />
            </div>
            <div class="h-4 bg-gray-200 rounded w-5/6 mb-2" />
            <div class="h-4 bg-gray-200 rounded w-2/3" />
        </div>
    }
}
