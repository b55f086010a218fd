// Copyright 2024 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Update a translated catalog from a POT template, like `msgmerge`
//! without fuzzy matching.

use polib::catalog::Catalog;
use polib::message::{Message, MessageView};

use crate::context;

/// Build the merged version of one message.
///
/// Everything except the translation comes from the template. A
/// translation which was fuzzy stays fuzzy.
fn merge_message(template: &dyn MessageView, translation: Option<&dyn MessageView>) -> Message {
    let mut flags = template.flags().clone();
    if translation.is_some_and(|message| message.is_fuzzy()) && !template.is_fuzzy() {
        flags.add_flag("fuzzy");
    }
    if template.is_plural() {
        let msgstr_plural = translation
            .and_then(|message| message.msgstr_plural().ok())
            .cloned()
            .unwrap_or_else(|| vec![String::new(); 2]);
        return Message::build_plural()
            .with_msgctxt(String::from(template.msgctxt()))
            .with_msgid(String::from(template.msgid()))
            .with_msgid_plural(String::from(template.msgid_plural().unwrap_or_default()))
            .with_msgstr_plural(msgstr_plural)
            .with_comments(String::from(template.comments()))
            .with_source(String::from(template.source()))
            .with_flags(flags)
            .done();
    }
    let msgstr = translation
        .and_then(|message| message.msgstr().ok())
        .unwrap_or_default();
    Message::build_singular()
        .with_msgctxt(String::from(template.msgctxt()))
        .with_msgid(String::from(template.msgid()))
        .with_msgstr(String::from(msgstr))
        .with_comments(String::from(template.comments()))
        .with_source(String::from(template.source()))
        .with_flags(flags)
        .done()
}

/// Look up `message` in `catalog` by context, msgid and plural msgid.
fn find_in<'a>(catalog: &'a Catalog, message: &dyn MessageView) -> Option<&'a dyn MessageView> {
    catalog.find_message(
        context(message.msgctxt()),
        message.msgid(),
        message.msgid_plural().ok(),
    )
}

/// Merge `catalog` with `template`.
///
/// Messages keep their position in `catalog`. Messages which no
/// longer exist in the template are dropped, and new template
/// messages are appended untranslated.
pub fn merge_catalog(catalog: Catalog, template: &Catalog) -> Catalog {
    let mut messages = Vec::new();
    for message in catalog.messages() {
        if let Some(template_message) = find_in(template, message) {
            messages.push(merge_message(template_message, Some(message)));
        }
    }
    for template_message in template.messages() {
        if find_in(&catalog, template_message).is_none() {
            messages.push(merge_message(template_message, None));
        }
    }

    let mut merged = Catalog::new(catalog.metadata);
    for message in messages {
        merged.append_or_update(message);
    }
    merged
}
