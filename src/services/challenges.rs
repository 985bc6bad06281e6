//! Debugging-challenge catalog and fix validation
//!
//! The catalog is a fixed set of small buggy C++ snippets, each with one
//! `// FIXME` line to repair. Validation compares the user's line against
//! the known fix, ignoring whitespace and case.

use std::sync::OnceLock;

use serde_json::json;

use crate::models::challenges::{Challenge, Difficulty, TestCase};

/// Full catalog, built once on first access
pub fn catalog() -> &'static [Challenge] {
    static CATALOG: OnceLock<Vec<Challenge>> = OnceLock::new();
    CATALOG.get_or_init(build_catalog).as_slice()
}

/// Looks up a challenge by id
pub fn find(id: u32) -> Option<&'static Challenge> {
    catalog().iter().find(|c| c.id == id)
}

/// Filters the catalog by difficulty and/or tag; both filters optional
pub fn filtered(difficulty: Option<Difficulty>, tag: Option<&str>) -> Vec<&'static Challenge> {
    catalog()
        .iter()
        .filter(|c| difficulty.map_or(true, |d| c.difficulty == d))
        .filter(|c| tag.map_or(true, |t| c.tags.iter().any(|ct| ct == t)))
        .collect()
}

/// Checks a proposed fix against the challenge's correct line.
///
/// Whitespace- and case-insensitive, so `return-1 ;` and `return -1;`
/// both pass.
pub fn validate_fix(challenge: &Challenge, user_fix: &str) -> bool {
    normalize(user_fix) == normalize(&challenge.correct_line)
}

fn normalize(line: &str) -> String {
    line.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

struct ChallengeSpec {
    id: u32,
    title: &'static str,
    difficulty: Difficulty,
    tags: &'static [&'static str],
    problem: &'static str,
    buggy_code: &'static str,
    test_cases: Vec<TestCase>,
    correct_line: &'static str,
}

impl From<ChallengeSpec> for Challenge {
    fn from(spec: ChallengeSpec) -> Self {
        Challenge {
            id: spec.id,
            title: spec.title.to_string(),
            difficulty: spec.difficulty,
            tags: spec.tags.iter().map(|t| t.to_string()).collect(),
            problem: spec.problem.to_string(),
            buggy_code: spec.buggy_code.to_string(),
            test_cases: spec.test_cases,
            correct_line: spec.correct_line.to_string(),
        }
    }
}

fn case(input: serde_json::Value, output: serde_json::Value) -> TestCase {
    TestCase { input, output }
}

fn build_catalog() -> Vec<Challenge> {
    vec![
        ChallengeSpec {
            id: 1,
            title: "Binary Search Edge Case",
            difficulty: Difficulty::Easy,
            tags: &["binary-search", "edge-case"],
            problem: "Implement binary search to return -1 if target is not found.",
            buggy_code: r#"int binary_search(vector<int>& arr, int target) {
    int left = 0, right = arr.size() - 1;
    while (left <= right) {
        int mid = (left + right) / 2;
        if (arr[mid] == target) return mid;
        else if (arr[mid] < target) left = mid + 1;
        else right = mid - 1;
    }
    // FIXME
}"#,
            test_cases: vec![
                case(json!({"arr": [1, 2, 3, 4], "target": 5}), json!(-1)),
                case(json!({"arr": [], "target": 1}), json!(-1)),
                case(json!({"arr": [1], "target": 1}), json!(0)),
            ],
            correct_line: "return -1;",
        }
        .into(),
        ChallengeSpec {
            id: 2,
            title: "Sum of Digits Zero Handling",
            difficulty: Difficulty::Easy,
            tags: &["math", "edge-case"],
            problem: "Calculate the sum of digits for a non-negative integer n.",
            buggy_code: r#"int sum_digits(int n) {
    int total = 0;
    while (n > 0) {
        total += n % 10;
        n /= 10;
    }
    // FIXME
}"#,
            test_cases: vec![
                case(json!({"n": 0}), json!(0)),
                case(json!({"n": 5}), json!(5)),
                case(json!({"n": 123}), json!(6)),
            ],
            correct_line: "return total;",
        }
        .into(),
        ChallengeSpec {
            id: 3,
            title: "Palindrome Empty String",
            difficulty: Difficulty::Easy,
            tags: &["strings", "edge-case"],
            problem: "Check if a string is a palindrome. An empty string is a palindrome.",
            buggy_code: r#"bool is_palindrome(string s) {
    int l = 0, r = s.size() - 1;
    while (l < r) {
        if (s[l] != s[r]) return false;
        l++; r--;
    }
    // FIXME
}"#,
            test_cases: vec![
                case(json!({"s": ""}), json!(true)),
                case(json!({"s": "a"}), json!(true)),
                case(json!({"s": "aba"}), json!(true)),
                case(json!({"s": "abc"}), json!(false)),
            ],
            correct_line: "return true;",
        }
        .into(),
        ChallengeSpec {
            id: 4,
            title: "Max in Array Empty Case",
            difficulty: Difficulty::Medium,
            tags: &["arrays", "edge-case"],
            problem: "Return the maximum element in an array. If empty, return INT_MIN.",
            buggy_code: r#"int max_in_array(vector<int>& arr) {
    if (arr.empty()) {
        // FIXME
    }
    int mx = arr[0];
    for (int i = 1; i < arr.size(); ++i) {
        if (arr[i] > mx) mx = arr[i];
    }
    return mx;
}"#,
            test_cases: vec![
                case(json!({"arr": []}), json!(-2147483648i64)),
                case(json!({"arr": [1, 2, 3]}), json!(3)),
                case(json!({"arr": [-5, -2, -7]}), json!(-2)),
            ],
            correct_line: "return INT_MIN;",
        }
        .into(),
        ChallengeSpec {
            id: 5,
            title: "Factorial Zero Case",
            difficulty: Difficulty::Easy,
            tags: &["math", "recursion", "edge-case"],
            problem: "Return the factorial of n. 0! = 1.",
            buggy_code: r#"int factorial(int n) {
    if (n < 0) return -1;
    if (n == 0) {
        // FIXME
    }
    return n * factorial(n - 1);
}"#,
            test_cases: vec![
                case(json!({"n": 0}), json!(1)),
                case(json!({"n": 5}), json!(120)),
                case(json!({"n": 1}), json!(1)),
            ],
            correct_line: "return 1;",
        }
        .into(),
        ChallengeSpec {
            id: 6,
            title: "Sum of Array Single Element",
            difficulty: Difficulty::Easy,
            tags: &["arrays", "edge-case"],
            problem: "Return the sum of all elements in an array.",
            buggy_code: r#"int sum_array(vector<int>& arr) {
    int sum = 0;
    for (int i = 0; i < arr.size(); ++i) {
        sum += arr[i];
    }
    // FIXME
}"#,
            test_cases: vec![
                case(json!({"arr": [42]}), json!(42)),
                case(json!({"arr": [1, 2, 3]}), json!(6)),
                case(json!({"arr": []}), json!(0)),
            ],
            correct_line: "return sum;",
        }
        .into(),
        ChallengeSpec {
            id: 7,
            title: "Division by Zero",
            difficulty: Difficulty::Medium,
            tags: &["math", "edge-case"],
            problem: "Return a / b. If b is zero, return -1.",
            buggy_code: r#"int safe_divide(int a, int b) {
    if (b == 0) {
        // FIXME
    }
    return a / b;
}"#,
            test_cases: vec![
                case(json!({"a": 10, "b": 2}), json!(5)),
                case(json!({"a": 5, "b": 0}), json!(-1)),
                case(json!({"a": 0, "b": 3}), json!(0)),
            ],
            correct_line: "return -1;",
        }
        .into(),
        ChallengeSpec {
            id: 8,
            title: "First Element in Empty Vector",
            difficulty: Difficulty::Medium,
            tags: &["arrays", "edge-case"],
            problem: "Return the first element of a vector. If empty, return -1.",
            buggy_code: r#"int first_element(vector<int>& arr) {
    if (arr.empty()) {
        // FIXME
    }
    return arr[0];
}"#,
            test_cases: vec![
                case(json!({"arr": [10, 20, 30]}), json!(10)),
                case(json!({"arr": []}), json!(-1)),
            ],
            correct_line: "return -1;",
        }
        .into(),
        ChallengeSpec {
            id: 9,
            title: "String to Int Conversion",
            difficulty: Difficulty::Medium,
            tags: &["strings", "parsing", "edge-case"],
            problem: "Convert a string to int. If the string is empty, return 0.",
            buggy_code: r#"int string_to_int(string s) {
    if (s.empty()) {
        // FIXME
    }
    return stoi(s);
}"#,
            test_cases: vec![
                case(json!({"s": "123"}), json!(123)),
                case(json!({"s": ""}), json!(0)),
                case(json!({"s": "0"}), json!(0)),
            ],
            correct_line: "return 0;",
        }
        .into(),
        ChallengeSpec {
            id: 10,
            title: "Check Even Odd",
            difficulty: Difficulty::Easy,
            tags: &["math", "edge-case"],
            problem: "Return true if n is even, false if odd.",
            buggy_code: r#"bool is_even(int n) {
    // FIXME
}"#,
            test_cases: vec![
                case(json!({"n": 2}), json!(true)),
                case(json!({"n": 5}), json!(false)),
                case(json!({"n": 0}), json!(true)),
            ],
            correct_line: "return n % 2 == 0;",
        }
        .into(),
    ]
}
