// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Struct-tag style annotation strings
//!
//! An annotation string is a space separated list of `name:"value"` pairs.
//! Values are double quoted with backslash escapes. Scanning stops at the
//! first malformed pair; everything before it remains visible.

use indexmap::IndexMap;

/// Iterator over `(name, quoted value)` pairs of an annotation string
#[derive(Debug, Clone)]
pub struct Pairs<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Pairs<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.rest.trim_start_matches(' ');
        let bytes = tag.as_bytes();

        let mut i = 0;
        while i < bytes.len()
            && bytes[i] > b' '
            && bytes[i] != b':'
            && bytes[i] != b'"'
            && bytes[i] != 0x7f
        {
            i += 1;
        }
        if i == 0 || i + 1 >= bytes.len() || bytes[i] != b':' || bytes[i + 1] != b'"' {
            self.rest = "";
            return None;
        }
        let name = &tag[..i];
        let tail = &tag[i + 1..];
        let tail_bytes = tail.as_bytes();

        let mut j = 1;
        while j < tail_bytes.len() && tail_bytes[j] != b'"' {
            if tail_bytes[j] == b'\\' {
                j += 1;
            }
            j += 1;
        }
        if j >= tail_bytes.len() {
            self.rest = "";
            return None;
        }

        self.rest = &tail[j + 1..];
        Some((name, &tail[..=j]))
    }
}

/// Iterate over the raw pairs of an annotation string
pub fn pairs(tag: &str) -> Pairs<'_> {
    Pairs { rest: tag }
}

/// Value of the annotation `key`, if present and well formed
pub fn lookup(tag: &str, key: &str) -> Option<String> {
    pairs(tag)
        .find(|(name, _)| *name == key)
        .and_then(|(_, quoted)| unquote(quoted))
}

/// All annotations in declaration order; the first occurrence of a name wins
pub fn parse_annotations(tag: &str) -> IndexMap<String, String> {
    let mut annotations = IndexMap::new();
    for (name, quoted) in pairs(tag) {
        if annotations.contains_key(name) {
            continue;
        }
        if let Some(value) = unquote(quoted) {
            annotations.insert(name.to_string(), value);
        }
    }
    annotations
}

/// Decode a double quoted value
pub fn unquote(quoted: &str) -> Option<String> {
    let inner = quoted.strip_prefix('"')?.strip_suffix('"')?;
    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' | '\n' => return None,
            '\\' => {
                let escaped = match chars.next()? {
                    'a' => '\u{7}',
                    'b' => '\u{8}',
                    'f' => '\u{c}',
                    'n' => '\n',
                    'r' => '\r',
                    't' => '\t',
                    'v' => '\u{b}',
                    '\\' => '\\',
                    '"' => '"',
                    '\'' => '\'',
                    'x' => hex_char(&mut chars, 2)?,
                    'u' => hex_char(&mut chars, 4)?,
                    'U' => hex_char(&mut chars, 8)?,
                    _ => return None,
                };
                value.push(escaped);
            }
            c => value.push(c),
        }
    }
    Some(value)
}

fn hex_char(chars: &mut std::str::Chars<'_>, digits: usize) -> Option<char> {
    let mut code = 0u32;
    for _ in 0..digits {
        code = code * 16 + chars.next()?.to_digit(16)?;
    }
    char::from_u32(code)
}
