/// A single listing page to visit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_number: u32,
}

impl PageRequest {
    pub fn new(page_number: u32) -> Self {
        Self { page_number }
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// The listing URL for this page
    ///
    /// Page 1 is the site root itself; every other page lives at
    /// `{base_url}/page/{n}/`.
    pub fn url(&self, base_url: &str) -> String {
        if self.page_number == 1 {
            base_url.to_string()
        } else {
            format!("{}/page/{}/", base_url.trim_end_matches('/'), self.page_number)
        }
    }
}
