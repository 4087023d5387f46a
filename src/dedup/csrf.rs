/// Django 的 CSRF 令牌，从 cookie 读取后原样放进请求头
#[derive(Clone, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 从 `Cookie` 头 (`a=1; csrftoken=xyz`) 中取出指定名称的值
    pub fn from_cookie_header(header: &str, name: &str) -> Option<Self> {
        header
            .split(';')
            .map(str::trim)
            .filter_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
            .next()
            .and_then(|value| urlencoding::decode(value).ok())
            .map(|value| Self(value.into_owned()))
    }
}

impl std::fmt::Debug for CsrfToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CsrfToken(***)")
    }
}
