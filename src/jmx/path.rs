/// Работа с составными путями атрибутов.
///
/// Имя атрибута и имена полей composite data разделяются точками. Сама
/// точка в имени экранируется обратным слешем, слеш — двойным слешем.
/// Реальный разделитель — неэкранированная точка, то есть точка, перед
/// которой стоит чётное число подряд идущих слешей.

/// Ищет позицию первого неэкранированного разделителя.
pub fn separator_index(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();

    for (i, b) in bytes.iter().enumerate() {
        if *b != b'.' {
            continue;
        }

        // Считаем слеши слева от точки
        let mut backslashes = 0;
        while backslashes < i && bytes[i - backslashes - 1] == b'\\' {
            backslashes += 1;
        }

        if backslashes % 2 == 0 {
            return Some(i);
        }
    }

    None
}

/// Разбивает путь по первому неэкранированному разделителю.
/// Если разделителя нет — весь путь уходит в голову, хвост пустой.
pub fn split(raw: &str) -> (&str, &str) {
    match separator_index(raw) {
        Some(i) => (&raw[..i], &raw[i + 1..]),
        None => (raw, ""),
    }
}

/// Убирает по одному экранирующему слешу перед каждой экранированной
/// точкой или слешем. Остальные символы не трогаем: одиночный слеш в
/// конце строки проходит как есть, ошибок кодек не поднимает.
pub fn unescape(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut chars = segment.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some(&next @ ('\\' | '.')) => {
                    // Экранирующий слеш выбрасываем, следующий символ — как есть
                    chars.next();
                    out.push(next);
                }
                _ => out.push(c),
            }
        } else {
            out.push(c);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn split_without_backslashes_keeps_whole_head() {
        assert_eq!(split("HeapMemoryUsage"), ("HeapMemoryUsage", ""));
        assert_eq!(separator_index("plain"), None);
    }

    #[test]
    fn split_finds_first_unescaped_dot() {
        assert_eq!(split("stat.current"), ("stat", "current"));
        assert_eq!(split("a.b.c"), ("a", "b.c"));
    }

    #[test]
    fn escaped_dot_is_not_a_separator() {
        assert_eq!(split(r"a\.b.c"), (r"a\.b", "c"));
    }

    #[test]
    fn escaped_backslash_before_dot_is_a_separator() {
        // Два слеша — экранированный слеш, точка после них реальная
        assert_eq!(split(r"a\\.b"), (r"a\\", "b"));
        // Три слеша — слеш плюс экранированная точка
        assert_eq!(split(r"a\\\.b"), (r"a\\\.b", ""));
    }

    #[test]
    fn unescape_removes_single_escaping_backslash() {
        assert_eq!(unescape(r"a\.b"), "a.b");
        assert_eq!(unescape(r"a\\b"), r"a\b");
        assert_eq!(unescape("plain"), "plain");
    }

    #[test]
    fn unescape_passes_trailing_lone_backslash() {
        assert_eq!(unescape(r"bad\"), r"bad\");
        assert_eq!(unescape(r"\x"), r"\x");
    }

    #[test]
    fn leading_dot_is_separator() {
        assert_eq!(split(".tail"), ("", "tail"));
    }
}
