/// Next index in a list of `len` items, wrapping to the start.
pub const fn wrap_increment(index: usize, len: usize) -> usize {
    match len {
        0 => 0,
        _ => (index + 1) % len,
    }
}

/// Previous index in a list of `len` items, wrapping to the end.
pub const fn wrap_decrement(index: usize, len: usize) -> usize {
    match (index, len) {
        (_, 0) => 0,
        (0, _) => len - 1,
        _ => (index - 1) % len,
    }
}

/// Keeps a selection inside a list that may have shrunk.
pub const fn clamp_index(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if index >= len {
        len - 1
    } else {
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_both_ways() {
        assert_eq!(wrap_increment(2, 3), 0);
        assert_eq!(wrap_decrement(0, 3), 2);
        assert_eq!(wrap_increment(0, 0), 0);
        assert_eq!(wrap_decrement(0, 0), 0);
    }

    #[test]
    fn clamps_to_the_last_item() {
        assert_eq!(clamp_index(7, 3), 2);
        assert_eq!(clamp_index(1, 3), 1);
        assert_eq!(clamp_index(4, 0), 0);
    }
}
