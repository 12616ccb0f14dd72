// Copyright 2025 Fernando Borretti
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

use crate::types::card::Card;

/// The seed deck shipped with the application: (front, back, category).
const BUILTIN: [(&str, &str, &str); 20] = [
    (
        "How to declare ArrayList in Java?",
        "ArrayList<Integer> list = new ArrayList<>();",
        "Java",
    ),
    ("Binary Search Time Complexity?", "O(log n)", "DSA"),
    ("Java String to Int conversion?", "Integer.parseInt(str)", "Java"),
    ("How to create array in Java?", "int[] arr = new int[5];", "Java"),
    ("Linear Search Time Complexity?", "O(n)", "DSA"),
    ("How to find array length in Java?", "arr.length", "Java"),
    ("Quick Sort Time Complexity (Average)?", "O(n log n)", "DSA"),
    (
        "How to reverse a string in Java?",
        "new StringBuilder(str).reverse().toString()",
        "Java",
    ),
    (
        "Stack operations time complexity?",
        "Push: O(1), Pop: O(1), Peek: O(1)",
        "DSA",
    ),
    (
        "How to check if string is empty?",
        "str.isEmpty() or str.length() == 0",
        "Java",
    ),
    ("Queue time complexity?", "Enqueue: O(1), Dequeue: O(1)", "DSA"),
    ("How to compare strings in Java?", "str1.equals(str2)", "Java"),
    (
        "Binary Tree height formula?",
        "Height = log₂(n+1) - 1 for complete tree",
        "DSA",
    ),
    (
        "How to iterate HashMap in Java?",
        "for (Map.Entry<K,V> entry : map.entrySet())",
        "Java",
    ),
    (
        "DFS Time Complexity?",
        "O(V + E) where V=vertices, E=edges",
        "DSA",
    ),
    (
        "How to create HashSet in Java?",
        "HashSet<Integer> set = new HashSet<>();",
        "Java",
    ),
    (
        "Merge Sort Time Complexity?",
        "O(n log n) - always stable",
        "DSA",
    ),
    ("How to sort array in Java?", "Arrays.sort(arr)", "Java"),
    ("Linked List insertion at head?", "O(1)", "DSA"),
    (
        "How to convert char to String?",
        "String.valueOf(ch) or Character.toString(ch)",
        "Java",
    ),
];

/// The number of built-in cards. Built-ins always precede custom cards in the
/// combined view, so subtracting this from a combined index yields the
/// custom-list index.
pub const BUILTIN_COUNT: usize = BUILTIN.len();

pub fn builtin_cards() -> Vec<Card> {
    BUILTIN
        .iter()
        .map(|(front, back, category)| Card::new(*front, *back, *category))
        .collect()
}
