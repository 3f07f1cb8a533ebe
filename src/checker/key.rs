use super::error::CheckError;

/// Ожидаемые форматы ключей — уходят пользователю в тексте ошибки
pub const FETCH_KEY_FORMAT: &str = "fetch[<object name>,<attribute path>]";
pub const DISCOVER_KEY_FORMAT: &str = "discover";

/// Разобранный ключ элемента данных: идентификатор и упорядоченные
/// аргументы. Сам по себе ключ ничего не знает о бэкендах — какой
/// идентификатор что означает, решает чекер.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemKey {
    id: String,
    args: Vec<String>,
}

impl ItemKey {
    /// Парсит ключ вида `id` или `id[arg1,arg2,...]`. Аргумент можно
    /// взять в двойные кавычки, внутри них работают `\"` и `\\`.
    pub fn parse(key: &str) -> Result<Self, CheckError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(CheckError::InvalidKey("empty key".to_string()));
        }

        let (id, rest) = match key.find('[') {
            Some(i) => (&key[..i], Some(&key[i..])),
            None => (key, None),
        };

        if id.is_empty()
            || !id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-')
        {
            return Err(CheckError::InvalidKey(format!("bad key ID in '{}'", key)));
        }

        let args = match rest {
            Some(rest) => parse_arguments(rest)
                .ok_or_else(|| CheckError::InvalidKey(format!("bad argument list in '{}'", key)))?,
            None => Vec::new(),
        };

        Ok(Self {
            id: id.to_string(),
            args,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }
}

/// Разбирает `[...]` на аргументы. None — список не по форме.
fn parse_arguments(raw: &str) -> Option<Vec<String>> {
    let inner = raw.strip_prefix('[')?.strip_suffix(']')?;
    if inner.chars().any(|c| c == '[' || c == ']') {
        return None;
    }
    if inner.trim().is_empty() {
        return Some(Vec::new());
    }

    let mut args = Vec::new();
    let mut chars = inner.chars().peekable();

    loop {
        // Пробелы перед аргументом не значимы
        while matches!(chars.peek(), Some(' ')) {
            chars.next();
        }

        if chars.peek() == Some(&'"') {
            chars.next();
            let mut arg = String::new();
            loop {
                match chars.next()? {
                    '\\' => match chars.next()? {
                        c @ ('"' | '\\') => arg.push(c),
                        c => {
                            arg.push('\\');
                            arg.push(c);
                        }
                    },
                    '"' => break,
                    c => arg.push(c),
                }
            }
            args.push(arg);
            // После закрывающей кавычки — только запятая или конец
            while matches!(chars.peek(), Some(' ')) {
                chars.next();
            }
            match chars.next() {
                None => break,
                Some(',') => continue,
                Some(_) => return None,
            }
        } else {
            let mut arg = String::new();
            let mut terminated = false;
            for c in chars.by_ref() {
                if c == ',' {
                    terminated = true;
                    break;
                }
                arg.push(c);
            }
            args.push(arg.trim().to_string());
            if !terminated {
                break;
            }
        }
    }

    Some(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_fetch_with_two_arguments() {
        let key = ItemKey::parse("fetch[java.lang:type=Memory,HeapMemoryUsage.used]").unwrap();
        assert_eq!(key.id(), "fetch");
        assert_eq!(
            key.args(),
            &[
                "java.lang:type=Memory".to_string(),
                "HeapMemoryUsage.used".to_string()
            ]
        );
        assert_eq!(key.arg(0), Some("java.lang:type=Memory"));
        assert_eq!(key.arg(2), None);
    }

    #[test]
    fn discover_has_no_arguments_with_or_without_brackets() {
        assert_eq!(ItemKey::parse("discover").unwrap().args().len(), 0);
        assert_eq!(ItemKey::parse("discover[]").unwrap().args().len(), 0);
    }

    #[test]
    fn quoted_argument_keeps_commas_and_quotes() {
        let key = ItemKey::parse(r#"fetch["a,b",attr]"#).unwrap();
        assert_eq!(key.args(), &["a,b".to_string(), "attr".to_string()]);

        let key = ItemKey::parse(r#"fetch["say \"hi\"",x]"#).unwrap();
        assert_eq!(key.arg(0), Some(r#"say "hi""#));
    }

    #[test]
    fn empty_trailing_argument_is_kept() {
        let key = ItemKey::parse("fetch[Obj,]").unwrap();
        assert_eq!(key.args(), &["Obj".to_string(), String::new()]);
    }

    #[test]
    fn malformed_keys_are_rejected() {
        assert!(matches!(
            ItemKey::parse(""),
            Err(CheckError::InvalidKey(_))
        ));
        assert!(matches!(
            ItemKey::parse("fetch[unclosed"),
            Err(CheckError::InvalidKey(_))
        ));
        assert!(matches!(
            ItemKey::parse("fe tch[a]"),
            Err(CheckError::InvalidKey(_))
        ));
        assert!(matches!(
            ItemKey::parse(r#"fetch["a"b]"#),
            Err(CheckError::InvalidKey(_))
        ));
    }
}
