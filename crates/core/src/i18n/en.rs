//! English strings.

pub const ENTRIES: &[(&str, &str)] = &[
    // Site chrome
    ("site.name", "Bazaar"),
    ("site.tagline", "Everyday goods, delivered"),
    ("nav.home", "Home"),
    ("nav.products", "Products"),
    ("nav.categories", "Categories"),
    ("nav.cart", "Cart"),
    ("nav.wishlist", "Wishlist"),
    ("nav.contact", "Contact"),
    ("nav.search_placeholder", "Search products..."),
    ("nav.switch_language", "العربية"),
    ("footer.rights", "All rights reserved."),
    // Shared labels
    ("common.add_to_cart", "Add to cart"),
    ("common.view", "View"),
    ("common.price", "Price"),
    ("common.quantity", "Quantity"),
    ("common.remove", "Remove"),
    ("common.update", "Update"),
    ("common.total", "Total"),
    ("common.subtotal", "Subtotal"),
    ("common.save", "Save"),
    ("common.cancel", "Cancel"),
    ("common.delete", "Delete"),
    ("common.edit", "Edit"),
    ("common.back", "Back"),
    ("common.previous", "Previous"),
    ("common.next", "Next"),
    ("common.page_of", "Page {current} of {last}"),
    ("common.out_of_stock", "Out of stock"),
    ("common.in_stock", "In stock"),
    ("common.sale", "Sale"),
    ("common.search", "Search"),
    ("common.all", "All"),
    ("common.actions", "Actions"),
    ("common.optional", "optional"),
    ("common.yes", "Yes"),
    ("common.no", "No"),
    ("common.filter", "Filter"),
    // Home
    ("home.hero_title", "Shop the best of the season"),
    ("home.hero_subtitle", "Fresh arrivals every week, delivered to your door."),
    ("home.featured", "Featured products"),
    ("home.shop_by_category", "Shop by category"),
    ("home.view_all", "View all"),
    // Products
    ("products.title", "All products"),
    ("products.related", "You may also like"),
    ("products.no_results", "No products found."),
    ("products.results_for", "Results for \"{query}\""),
    ("products.sort", "Sort by"),
    ("products.sort.newest", "Newest"),
    ("products.sort.price_asc", "Price: low to high"),
    ("products.sort.price_desc", "Price: high to low"),
    ("products.sort.name", "Name"),
    // Categories
    ("categories.title", "Categories"),
    ("categories.empty", "No categories yet."),
    ("categories.products_count", "{count} products"),
    // Cart
    ("cart.title", "Shopping cart"),
    ("cart.empty", "Your cart is empty."),
    ("cart.continue_shopping", "Continue shopping"),
    ("cart.checkout", "Proceed to checkout"),
    ("cart.clear", "Empty cart"),
    ("cart.added", "Added to your cart."),
    ("cart.updated", "Cart updated."),
    ("cart.removed", "Item removed from your cart."),
    ("cart.cleared", "Your cart is now empty."),
    ("cart.out_of_stock", "Sorry, this product is out of stock."),
    ("cart.not_found", "That product is no longer available."),
    // Wishlist
    ("wishlist.title", "Wishlist"),
    ("wishlist.empty", "Your wishlist is empty."),
    ("wishlist.added", "Saved to your wishlist."),
    ("wishlist.removed", "Removed from your wishlist."),
    ("wishlist.full", "Your wishlist is full. Remove a product to save another."),
    ("wishlist.add", "Save"),
    ("wishlist.remove", "Unsave"),
    // Checkout
    ("checkout.title", "Checkout"),
    ("checkout.place_order", "Place order"),
    ("checkout.name", "Full name"),
    ("checkout.phone", "Phone"),
    ("checkout.email", "Email"),
    ("checkout.address", "Shipping address"),
    ("checkout.city", "City"),
    ("checkout.notes", "Order notes"),
    ("checkout.summary", "Order summary"),
    ("checkout.success_title", "Thank you for your order!"),
    ("checkout.success_body", "We will contact you shortly to confirm delivery."),
    ("checkout.order_number", "Order number"),
    ("checkout.failed", "We could not place your order. Please try again."),
    ("checkout.fix_errors", "Please correct the highlighted fields."),
    // Contact
    ("contact.title", "Contact us"),
    ("contact.intro", "Questions about an order or a product? Send us a message."),
    ("contact.name", "Name"),
    ("contact.email", "Email"),
    ("contact.phone", "Phone"),
    ("contact.subject", "Subject"),
    ("contact.message", "Message"),
    ("contact.send", "Send message"),
    ("contact.sent", "Thanks! Your message has been sent."),
    ("contact.failed", "Something went wrong. Please try again later."),
    ("contact.fix_errors", "Please correct the highlighted fields."),
    // Validation
    ("validation.required", "This field is required."),
    ("validation.email", "Please enter a valid email address."),
    ("validation.too_long", "This field is too long."),
    ("validation.phone", "Please enter a valid phone number."),
    ("validation.number", "Please enter a number."),
    ("validation.min_zero", "Must be zero or more."),
    // Errors
    ("error.not_found", "Page not found."),
    ("error.backend_unavailable", "The store is temporarily unavailable."),
    ("error.generic", "Something went wrong."),
    ("error.too_many_requests", "Too many requests. Please wait a moment."),
    // Order status
    ("order.status.pending", "Pending"),
    ("order.status.processing", "Processing"),
    ("order.status.shipped", "Shipped"),
    ("order.status.delivered", "Delivered"),
    ("order.status.cancelled", "Cancelled"),
    // Admin: auth
    ("admin.title", "Bazaar Dashboard"),
    ("admin.login.title", "Sign in"),
    ("admin.login.email", "Email"),
    ("admin.login.password", "Password"),
    ("admin.login.submit", "Sign in"),
    ("admin.login.failed", "Invalid email or password."),
    ("admin.login.not_admin", "This account does not have dashboard access."),
    ("admin.logout", "Sign out"),
    ("admin.logged_out", "You have been signed out."),
    ("admin.session_expired", "Your session expired. Please sign in again."),
    // Admin: navigation
    ("admin.nav.dashboard", "Dashboard"),
    ("admin.nav.products", "Products"),
    ("admin.nav.categories", "Categories"),
    ("admin.nav.orders", "Orders"),
    ("admin.nav.customers", "Customers"),
    // Admin: dashboard
    ("admin.dashboard.title", "Overview"),
    ("admin.dashboard.products", "Products"),
    ("admin.dashboard.orders", "Orders"),
    ("admin.dashboard.customers", "Customers"),
    ("admin.dashboard.revenue", "Revenue"),
    ("admin.dashboard.open_orders", "Open orders"),
    ("admin.dashboard.recent_orders", "Recent orders"),
    ("admin.dashboard.low_stock", "Low stock"),
    // Admin: fields
    ("admin.field.id", "ID"),
    ("admin.field.name", "Name"),
    ("admin.field.name_ar", "Arabic name"),
    ("admin.field.description", "Description"),
    ("admin.field.description_ar", "Arabic description"),
    ("admin.field.price", "Price"),
    ("admin.field.sale_price", "Sale price"),
    ("admin.field.stock", "Stock"),
    ("admin.field.category", "Category"),
    ("admin.field.image", "Image URL"),
    ("admin.field.featured", "Featured"),
    ("admin.field.status", "Status"),
    ("admin.field.email", "Email"),
    ("admin.field.phone", "Phone"),
    ("admin.field.orders_count", "Orders"),
    ("admin.field.total_spent", "Total spent"),
    ("admin.field.created_at", "Created"),
    ("admin.field.customer", "Customer"),
    ("admin.field.total", "Total"),
    ("admin.field.items", "Items"),
    ("admin.field.address", "Address"),
    ("admin.field.city", "City"),
    ("admin.field.notes", "Notes"),
    ("admin.field.products_count", "Products"),
    ("admin.no_category", "Uncategorized"),
    // Admin: products
    ("admin.products.title", "Products"),
    ("admin.products.new", "New product"),
    ("admin.products.edit", "Edit product"),
    ("admin.products.created", "Product created."),
    ("admin.products.updated", "Product updated."),
    ("admin.products.deleted", "Product deleted."),
    ("admin.products.confirm_delete", "Delete this product?"),
    // Admin: categories
    ("admin.categories.title", "Categories"),
    ("admin.categories.new", "New category"),
    ("admin.categories.edit", "Edit category"),
    ("admin.categories.created", "Category created."),
    ("admin.categories.updated", "Category updated."),
    ("admin.categories.deleted", "Category deleted."),
    ("admin.categories.confirm_delete", "Delete this category?"),
    // Admin: orders
    ("admin.orders.title", "Orders"),
    ("admin.orders.detail", "Order details"),
    ("admin.orders.update_status", "Update status"),
    ("admin.orders.status_updated", "Order status updated."),
    // Admin: customers
    ("admin.customers.title", "Customers"),
    ("admin.customers.detail", "Customer details"),
    // Admin: errors
    ("admin.error.load_failed", "Could not load data from the store backend."),
    ("admin.error.save_failed", "Could not save. Please check the form and try again."),
    ("admin.error.delete_failed", "Could not delete the record."),
    ("admin.error.not_found", "Record not found."),
    ("admin.empty", "Nothing here yet."),
];
