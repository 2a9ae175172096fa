/// Check whether a branch name matches a pattern specification.
///
/// A specification is a comma-separated list of sub-patterns, evaluated left
/// to right; the first satisfied sub-pattern wins. Each sub-pattern may use:
///
/// - `*` to match any run of characters within one path segment,
/// - `?` to match exactly one character within a segment,
/// - `**` to match any number of whole segments (including zero, so
///   `staging` satisfies `staging/**`),
/// - a leading `!` to invert the sub-pattern's result,
/// - a leading `\!` (or `\\!`) to match names that literally start with `!`.
///
/// Sub-patterns without wildcards compare case-insensitively; wildcard
/// patterns are case-sensitive. `/` and `\` are interchangeable separators.
/// The function is total: any input yields a boolean, never an error.
pub fn is_match(candidate: &str, pattern_spec: &str) -> bool {
	pattern_spec
		.split(',')
		.map(str::trim)
		.filter(|sub| !sub.is_empty())
		.any(|sub| match_sub_pattern(candidate, sub))
}

/// Evaluate a single sub-pattern, handling the invert and escape prefixes.
fn match_sub_pattern(candidate: &str, sub_pattern: &str) -> bool {
	let (pattern, inverted) = if let Some(rest) = sub_pattern.strip_prefix('!') {
		(rest, true)
	} else if sub_pattern.starts_with("\\!") || sub_pattern.starts_with("\\\\!") {
		// escape hatch: drop one backslash, keep the `!` literal
		(&sub_pattern[1..], false)
	} else {
		(sub_pattern, false)
	};

	let matched = if pattern.contains(['*', '?']) {
		glob_match(pattern, candidate)
	} else {
		pattern.eq_ignore_ascii_case(candidate)
	};

	if inverted { !matched } else { matched }
}

/// Segment-aware glob match of `candidate` against `pattern`.
///
/// Both sides are normalized to `/` separators first; empty segments are
/// dropped, but a leading separator must agree between pattern and candidate.
fn glob_match(pattern: &str, candidate: &str) -> bool {
	let pattern = pattern.replace('\\', "/");
	let candidate = candidate.replace('\\', "/");

	if pattern.starts_with('/') != candidate.starts_with('/') {
		return false;
	}

	let pattern_segments: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
	let candidate_segments: Vec<&str> = candidate.split('/').filter(|s| !s.is_empty()).collect();

	match_segments(&pattern_segments, &candidate_segments)
}

/// Match a list of pattern segments against candidate segments, where `**`
/// consumes zero or more whole segments.
fn match_segments(pattern: &[&str], segments: &[&str]) -> bool {
	match pattern.split_first() {
		None => segments.is_empty(),
		Some((&"**", rest)) => {
			(0..=segments.len()).any(|skip| match_segments(rest, &segments[skip..]))
		}
		Some((first, rest)) => match segments.split_first() {
			Some((segment, remaining)) => {
				match_segment(first, segment) && match_segments(rest, remaining)
			}
			None => false,
		},
	}
}

/// Match a single segment against a `*`/`?` wildcard pattern, case-sensitively.
fn match_segment(pattern: &str, text: &str) -> bool {
	let pattern: Vec<char> = pattern.chars().collect();
	let text: Vec<char> = text.chars().collect();

	let mut p = 0;
	let mut t = 0;
	let mut star: Option<(usize, usize)> = None;

	while t < text.len() {
		if p < pattern.len() && (pattern[p] == '?' || pattern[p] == text[t]) {
			p += 1;
			t += 1;
		} else if p < pattern.len() && pattern[p] == '*' {
			star = Some((p, t));
			p += 1;
		} else if let Some((star_p, star_t)) = star {
			// backtrack: let the last `*` swallow one more character
			p = star_p + 1;
			t = star_t + 1;
			star = Some((star_p, star_t + 1));
		} else {
			return false;
		}
	}

	while p < pattern.len() && pattern[p] == '*' {
		p += 1;
	}

	p == pattern.len()
}
