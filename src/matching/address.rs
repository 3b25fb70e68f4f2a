use crate::error::AddressFormatError;
use ipnetwork::IpNetwork;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

/// 正規化済みのアドレス範囲
///
/// ホスト表記 (`10.0.0.1`) は単一ホストのネットワーク (`/32`、IPv6は`/128`) として扱う。
/// プレフィックス内にホストビットが立っていてもエラーにはせず、ネットワークアドレスに丸める。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressRange(IpNetwork);

impl AddressRange {
    pub fn parse(expr: &str) -> Result<Self, AddressFormatError> {
        let trimmed = expr.trim();
        let invalid = || AddressFormatError(expr.to_string());

        let network = if trimmed.contains('/') {
            IpNetwork::from_str(trimmed).map_err(|_| invalid())?
        } else {
            let addr = IpAddr::from_str(trimmed).map_err(|_| invalid())?;
            IpNetwork::from(addr)
        };

        // ホストビットを落とす
        let network = IpNetwork::new(network.network(), network.prefix()).map_err(|_| invalid())?;
        Ok(Self(network))
    }

    pub fn overlaps(&self, other: &AddressRange) -> bool {
        if self == other {
            return true;
        }

        match (self.0, other.0) {
            (IpNetwork::V4(a), IpNetwork::V4(b)) => a.contains(b.network()) || b.contains(a.network()),
            (IpNetwork::V6(a), IpNetwork::V6(b)) => a.contains(b.network()) || b.contains(a.network()),
            _ => false,
        }
    }
}

impl fmt::Display for AddressRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0.network(), self.0.prefix())
    }
}

/// アドレス式をCIDR表記の正規形に変換する
pub fn normalize(expr: &str) -> Result<String, AddressFormatError> {
    AddressRange::parse(expr).map(|range| range.to_string())
}

pub fn equals(a: &str, b: &str) -> Result<bool, AddressFormatError> {
    Ok(AddressRange::parse(a)? == AddressRange::parse(b)?)
}

/// 二つのアドレス範囲が同一、または一部でも重なっていれば一致とみなす。
/// 範囲の大きさは判定に使わないため、引数の順序によらず結果は同じになる。
pub fn overlaps(a: &str, b: &str) -> Result<bool, AddressFormatError> {
    let a = AddressRange::parse(a)?;
    let b = AddressRange::parse(b)?;
    Ok(a.overlaps(&b))
}
