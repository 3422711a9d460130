//! Arabic strings.

pub const ENTRIES: &[(&str, &str)] = &[
    // Site chrome
    ("site.name", "بازار"),
    ("site.tagline", "احتياجاتك اليومية حتى باب بيتك"),
    ("nav.home", "الرئيسية"),
    ("nav.products", "المنتجات"),
    ("nav.categories", "الأقسام"),
    ("nav.cart", "السلة"),
    ("nav.wishlist", "المفضلة"),
    ("nav.contact", "اتصل بنا"),
    ("nav.search_placeholder", "ابحث عن منتج..."),
    ("nav.switch_language", "English"),
    ("footer.rights", "جميع الحقوق محفوظة."),
    // Shared labels
    ("common.add_to_cart", "أضف إلى السلة"),
    ("common.view", "عرض"),
    ("common.price", "السعر"),
    ("common.quantity", "الكمية"),
    ("common.remove", "إزالة"),
    ("common.update", "تحديث"),
    ("common.total", "الإجمالي"),
    ("common.subtotal", "المجموع الفرعي"),
    ("common.save", "حفظ"),
    ("common.cancel", "إلغاء"),
    ("common.delete", "حذف"),
    ("common.edit", "تعديل"),
    ("common.back", "رجوع"),
    ("common.previous", "السابق"),
    ("common.next", "التالي"),
    ("common.page_of", "صفحة {current} من {last}"),
    ("common.out_of_stock", "نفدت الكمية"),
    ("common.in_stock", "متوفر"),
    ("common.sale", "تخفيض"),
    ("common.search", "بحث"),
    ("common.all", "الكل"),
    ("common.actions", "إجراءات"),
    ("common.optional", "اختياري"),
    ("common.yes", "نعم"),
    ("common.no", "لا"),
    ("common.filter", "تصفية"),
    // Home
    ("home.hero_title", "تسوّق أفضل منتجات الموسم"),
    ("home.hero_subtitle", "منتجات جديدة كل أسبوع تصلك حتى الباب."),
    ("home.featured", "منتجات مميزة"),
    ("home.shop_by_category", "تسوّق حسب القسم"),
    ("home.view_all", "عرض الكل"),
    // Products
    ("products.title", "جميع المنتجات"),
    ("products.related", "قد يعجبك أيضاً"),
    ("products.no_results", "لا توجد منتجات."),
    ("products.results_for", "نتائج البحث عن \"{query}\""),
    ("products.sort", "ترتيب حسب"),
    ("products.sort.newest", "الأحدث"),
    ("products.sort.price_asc", "السعر: من الأقل إلى الأعلى"),
    ("products.sort.price_desc", "السعر: من الأعلى إلى الأقل"),
    ("products.sort.name", "الاسم"),
    // Categories
    ("categories.title", "الأقسام"),
    ("categories.empty", "لا توجد أقسام بعد."),
    ("categories.products_count", "{count} منتج"),
    // Cart
    ("cart.title", "سلة التسوق"),
    ("cart.empty", "سلتك فارغة."),
    ("cart.continue_shopping", "متابعة التسوق"),
    ("cart.checkout", "إتمام الطلب"),
    ("cart.clear", "إفراغ السلة"),
    ("cart.added", "تمت الإضافة إلى سلتك."),
    ("cart.updated", "تم تحديث السلة."),
    ("cart.removed", "تمت إزالة المنتج من سلتك."),
    ("cart.cleared", "أصبحت سلتك فارغة."),
    ("cart.out_of_stock", "عذراً، هذا المنتج غير متوفر حالياً."),
    ("cart.not_found", "هذا المنتج لم يعد متاحاً."),
    // Wishlist
    ("wishlist.title", "المفضلة"),
    ("wishlist.empty", "قائمة المفضلة فارغة."),
    ("wishlist.added", "تمت الإضافة إلى المفضلة."),
    ("wishlist.removed", "تمت الإزالة من المفضلة."),
    ("wishlist.full", "قائمة المفضلة ممتلئة. أزل منتجاً لحفظ منتج آخر."),
    ("wishlist.add", "أضف للمفضلة"),
    ("wishlist.remove", "أزل من المفضلة"),
    // Checkout
    ("checkout.title", "إتمام الطلب"),
    ("checkout.place_order", "تأكيد الطلب"),
    ("checkout.name", "الاسم الكامل"),
    ("checkout.phone", "رقم الجوال"),
    ("checkout.email", "البريد الإلكتروني"),
    ("checkout.address", "عنوان الشحن"),
    ("checkout.city", "المدينة"),
    ("checkout.notes", "ملاحظات الطلب"),
    ("checkout.summary", "ملخص الطلب"),
    ("checkout.success_title", "شكراً لطلبك!"),
    ("checkout.success_body", "سنتواصل معك قريباً لتأكيد التوصيل."),
    ("checkout.order_number", "رقم الطلب"),
    ("checkout.failed", "تعذر إرسال طلبك. يرجى المحاولة مرة أخرى."),
    ("checkout.fix_errors", "يرجى تصحيح الحقول المحددة."),
    // Contact
    ("contact.title", "اتصل بنا"),
    ("contact.intro", "لديك سؤال عن طلب أو منتج؟ راسلنا."),
    ("contact.name", "الاسم"),
    ("contact.email", "البريد الإلكتروني"),
    ("contact.phone", "رقم الجوال"),
    ("contact.subject", "الموضوع"),
    ("contact.message", "الرسالة"),
    ("contact.send", "إرسال الرسالة"),
    ("contact.sent", "شكراً! تم إرسال رسالتك."),
    ("contact.failed", "حدث خطأ ما. يرجى المحاولة لاحقاً."),
    ("contact.fix_errors", "يرجى تصحيح الحقول المحددة."),
    // Validation
    ("validation.required", "هذا الحقل مطلوب."),
    ("validation.email", "يرجى إدخال بريد إلكتروني صحيح."),
    ("validation.too_long", "هذا الحقل طويل جداً."),
    ("validation.phone", "يرجى إدخال رقم جوال صحيح."),
    ("validation.number", "يرجى إدخال رقم."),
    ("validation.min_zero", "يجب أن تكون القيمة صفراً أو أكثر."),
    // Errors
    ("error.not_found", "الصفحة غير موجودة."),
    ("error.backend_unavailable", "المتجر غير متاح مؤقتاً."),
    ("error.generic", "حدث خطأ ما."),
    ("error.too_many_requests", "طلبات كثيرة. يرجى الانتظار قليلاً."),
    // Order status
    ("order.status.pending", "قيد الانتظار"),
    ("order.status.processing", "قيد التجهيز"),
    ("order.status.shipped", "تم الشحن"),
    ("order.status.delivered", "تم التوصيل"),
    ("order.status.cancelled", "ملغي"),
    // Admin: auth
    ("admin.title", "لوحة تحكم بازار"),
    ("admin.login.title", "تسجيل الدخول"),
    ("admin.login.email", "البريد الإلكتروني"),
    ("admin.login.password", "كلمة المرور"),
    ("admin.login.submit", "دخول"),
    ("admin.login.failed", "البريد الإلكتروني أو كلمة المرور غير صحيحة."),
    ("admin.login.not_admin", "هذا الحساب لا يملك صلاحية الدخول إلى لوحة التحكم."),
    ("admin.logout", "تسجيل الخروج"),
    ("admin.logged_out", "تم تسجيل خروجك."),
    ("admin.session_expired", "انتهت الجلسة. يرجى تسجيل الدخول مجدداً."),
    // Admin: navigation
    ("admin.nav.dashboard", "لوحة التحكم"),
    ("admin.nav.products", "المنتجات"),
    ("admin.nav.categories", "الأقسام"),
    ("admin.nav.orders", "الطلبات"),
    ("admin.nav.customers", "العملاء"),
    // Admin: dashboard
    ("admin.dashboard.title", "نظرة عامة"),
    ("admin.dashboard.products", "المنتجات"),
    ("admin.dashboard.orders", "الطلبات"),
    ("admin.dashboard.customers", "العملاء"),
    ("admin.dashboard.revenue", "الإيرادات"),
    ("admin.dashboard.open_orders", "طلبات مفتوحة"),
    ("admin.dashboard.recent_orders", "أحدث الطلبات"),
    ("admin.dashboard.low_stock", "مخزون منخفض"),
    // Admin: fields
    ("admin.field.id", "الرقم"),
    ("admin.field.name", "الاسم"),
    ("admin.field.name_ar", "الاسم بالعربية"),
    ("admin.field.description", "الوصف"),
    ("admin.field.description_ar", "الوصف بالعربية"),
    ("admin.field.price", "السعر"),
    ("admin.field.sale_price", "سعر التخفيض"),
    ("admin.field.stock", "المخزون"),
    ("admin.field.category", "القسم"),
    ("admin.field.image", "رابط الصورة"),
    ("admin.field.featured", "مميز"),
    ("admin.field.status", "الحالة"),
    ("admin.field.email", "البريد الإلكتروني"),
    ("admin.field.phone", "الجوال"),
    ("admin.field.orders_count", "الطلبات"),
    ("admin.field.total_spent", "إجمالي المشتريات"),
    ("admin.field.created_at", "تاريخ الإنشاء"),
    ("admin.field.customer", "العميل"),
    ("admin.field.total", "الإجمالي"),
    ("admin.field.items", "المنتجات"),
    ("admin.field.address", "العنوان"),
    ("admin.field.city", "المدينة"),
    ("admin.field.notes", "ملاحظات"),
    ("admin.field.products_count", "المنتجات"),
    ("admin.no_category", "بدون قسم"),
    // Admin: products
    ("admin.products.title", "المنتجات"),
    ("admin.products.new", "منتج جديد"),
    ("admin.products.edit", "تعديل المنتج"),
    ("admin.products.created", "تم إنشاء المنتج."),
    ("admin.products.updated", "تم تحديث المنتج."),
    ("admin.products.deleted", "تم حذف المنتج."),
    ("admin.products.confirm_delete", "هل تريد حذف هذا المنتج؟"),
    // Admin: categories
    ("admin.categories.title", "الأقسام"),
    ("admin.categories.new", "قسم جديد"),
    ("admin.categories.edit", "تعديل القسم"),
    ("admin.categories.created", "تم إنشاء القسم."),
    ("admin.categories.updated", "تم تحديث القسم."),
    ("admin.categories.deleted", "تم حذف القسم."),
    ("admin.categories.confirm_delete", "هل تريد حذف هذا القسم؟"),
    // Admin: orders
    ("admin.orders.title", "الطلبات"),
    ("admin.orders.detail", "تفاصيل الطلب"),
    ("admin.orders.update_status", "تحديث الحالة"),
    ("admin.orders.status_updated", "تم تحديث حالة الطلب."),
    // Admin: customers
    ("admin.customers.title", "العملاء"),
    ("admin.customers.detail", "بيانات العميل"),
    // Admin: errors
    ("admin.error.load_failed", "تعذر تحميل البيانات من خادم المتجر."),
    ("admin.error.save_failed", "تعذر الحفظ. يرجى مراجعة النموذج والمحاولة مجدداً."),
    ("admin.error.delete_failed", "تعذر حذف السجل."),
    ("admin.error.not_found", "السجل غير موجود."),
    ("admin.empty", "لا يوجد شيء هنا بعد."),
];
