#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Price(i32);

impl Price {
    pub fn parse(price: i32) -> Result<Price, String> {
        if price < 0 {
            return Err(format!("{} is not a valid price", price));
        }

        Ok(Self(price))
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}
