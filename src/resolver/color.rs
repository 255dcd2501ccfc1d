//! 颜色转换
//! 渲染端吃 rgba() 形式，编辑端存 #RRGGBBAA，两个方向都提供

/// #RRGGBBAA 转 rgba() 形式
/// 只接受 9 字符带透明通道的十六进制串，其余返回 None
pub fn hex_to_rgba(hex: &str) -> Option<String> {
    if !hex.starts_with('#') || hex.len() != 9 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[1..3], 16).ok()?;
    let g = u8::from_str_radix(&hex[3..5], 16).ok()?;
    let b = u8::from_str_radix(&hex[5..7], 16).ok()?;
    let a = u8::from_str_radix(&hex[7..9], 16).ok()?;
    let alpha = f64::from(a) / 255.0;
    Some(format!("rgba({},{},{},{})", r, g, b, alpha))
}

/// rgba() 形式转回 #rrggbbaa
pub fn rgba_to_hex(rgba: &str) -> Option<String> {
    let inner = rgba
        .trim()
        .strip_prefix("rgba(")?
        .strip_suffix(')')?;
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        return None;
    }
    let r: u8 = parts[0].parse().ok()?;
    let g: u8 = parts[1].parse().ok()?;
    let b: u8 = parts[2].parse().ok()?;
    let alpha: f64 = parts[3].parse().ok()?;
    if !(0.0..=1.0).contains(&alpha) {
        return None;
    }
    let a = (alpha * 255.0).round() as u8;
    Some(format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a))
}

/// 解析结果归一化：带透明通道的十六进制转 rgba()，其余原样放行
/// 具名颜色和 rgb()/rgba() 字符串不动
pub fn normalize_color(color: &str) -> String {
    hex_to_rgba(color).unwrap_or_else(|| color.to_string())
}
