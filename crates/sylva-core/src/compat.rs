// Copyright 2025 eraflo
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

//! Compatibility shims installed into hosts that lack a primitive.

/// Signature of a buffer-slicing primitive: copies `buffer[start..end]` into
/// a new buffer, or returns `None` when the range is out of bounds.
pub type BufferSliceFn = fn(&[u8], usize, usize) -> Option<Vec<u8>>;

/// Fallback buffer-slicing primitive.
///
/// The returned buffer is an independent copy; writing to it never affects
/// `buffer`.
pub fn slice_buffer(buffer: &[u8], start: usize, end: usize) -> Option<Vec<u8>> {
    buffer.get(start..end).map(<[u8]>::to_vec)
}
