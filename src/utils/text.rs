/// 按单词首字母大写：字母前一个字符不是字母时大写，否则小写
pub fn title_case(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut previous_is_letter = false;

    for ch in text.chars() {
        if ch.is_alphabetic() {
            if previous_is_letter {
                output.extend(ch.to_lowercase());
            } else {
                output.extend(ch.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            output.push(ch);
            previous_is_letter = false;
        }
    }

    output
}

/// 去掉模型回复中常见的首尾引号与空白
pub fn strip_wrapping_quotes(text: &str) -> &str {
    let trimmed = text.trim();
    let quotes: &[char] = &['"', '\'', '`', '“', '”'];
    trimmed.trim_matches(quotes).trim()
}

/// 将名称转换为可安全用作文件名的形式
pub fn sanitize_file_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.' | '&') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = stem.trim_matches('.').to_string();
    if stem.is_empty() {
        "company".to_string()
    } else {
        stem
    }
}
